//! Calendar days for the group schedule
//!
//! The group plans one month at a time. Every event happens on a single
//! day of that month, identified by its day number (1-31).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of days covered by a schedule
pub const DAYS_IN_MONTH: u8 = 31;

/// Errors that can occur when building a day
#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("Day {0} is outside 1..=31")]
    OutOfRange(u8),
}

/// A validated day of the month (1-31)
///
/// # Example
/// ```
/// use group_outings_core::Day;
///
/// let day = Day::new(17).unwrap();
/// assert_eq!(day.get(), 17);
/// assert!(Day::new(0).is_err());
/// assert!(Day::new(32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    /// Create a day, rejecting numbers outside 1..=31
    pub fn new(day: u8) -> Result<Self, CalendarError> {
        if (1..=DAYS_IN_MONTH).contains(&day) {
            Ok(Self(day))
        } else {
            Err(CalendarError::OutOfRange(day))
        }
    }

    /// Day number (1-31)
    pub fn get(self) -> u8 {
        self.0
    }

    /// Every day of the month in order
    ///
    /// # Example
    /// ```
    /// use group_outings_core::Day;
    ///
    /// let days: Vec<u8> = Day::all().map(Day::get).collect();
    /// assert_eq!(days.len(), 31);
    /// assert_eq!(days[0], 1);
    /// assert_eq!(days[30], 31);
    /// ```
    pub fn all() -> impl Iterator<Item = Day> {
        (1..=DAYS_IN_MONTH).map(Day)
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Day::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
