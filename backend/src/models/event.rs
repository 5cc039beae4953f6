//! Event model
//!
//! Represents an activity the group may attend.
//! Each event has:
//! - Title and optional free-text description
//! - Cost per attendee (i64)
//! - Date (day of the month)
//! - Kind: circus, theatre or excursion, each with its own details
//! - Attendees (unique, in the order they signed up)
//!
//! Where an event lives (agenda or schedule) is tracked by the group, not
//! by the event itself.

use crate::core::calendar::Day;
use crate::models::child::ChildId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event_{}", self.0.simple())
    }
}

/// Kind of event together with its kind-specific details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Circus { tricks: Vec<String> },
    Theatre { genre: String },
    Excursion { sights: Vec<String> },
}

impl EventKind {
    /// Short name of the kind
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Circus { .. } => "circus",
            EventKind::Theatre { .. } => "theatre",
            EventKind::Excursion { .. } => "excursion",
        }
    }

    /// Kind-specific details as a single line
    ///
    /// # Example
    /// ```
    /// use group_outings_core::EventKind;
    ///
    /// let kind = EventKind::Circus {
    ///     tricks: vec!["by clowns".to_string(), "by mimes".to_string()],
    /// };
    /// assert_eq!(kind.details(), "by clowns, by mimes");
    /// ```
    pub fn details(&self) -> String {
        match self {
            EventKind::Circus { tricks } => tricks.join(", "),
            EventKind::Theatre { genre } => genre.clone(),
            EventKind::Excursion { sights } => sights.join(", "),
        }
    }
}

/// An activity with a cost, a date and a list of attendees
///
/// # Example
/// ```
/// use group_outings_core::{Day, Event};
///
/// let event = Event::theatre("Swan Lake", 150, Day::new(17).unwrap(), "ballet")
///     .with_description("Classic by Tchaikovsky");
/// assert_eq!(event.cost(), 150);
/// assert_eq!(event.attendee_count(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    id: EventId,

    title: String,

    /// Price per attendee, never negative
    cost: i64,

    date: Day,

    kind: EventKind,

    description: Option<String>,

    /// Attendees in sign-up order, no duplicates
    attendees: Vec<ChildId>,
}

impl Event {
    /// Create a new event
    ///
    /// # Panics
    ///
    /// Panics if `cost` is negative
    pub fn new(title: impl Into<String>, cost: i64, date: Day, kind: EventKind) -> Self {
        assert!(cost >= 0, "cost must be non-negative");
        Self {
            id: EventId::new(),
            title: title.into(),
            cost,
            date,
            kind,
            description: None,
            attendees: Vec::new(),
        }
    }

    pub fn circus<S: Into<String>>(
        title: impl Into<String>,
        cost: i64,
        date: Day,
        tricks: impl IntoIterator<Item = S>,
    ) -> Self {
        let tricks = tricks.into_iter().map(Into::into).collect();
        Self::new(title, cost, date, EventKind::Circus { tricks })
    }

    pub fn theatre(
        title: impl Into<String>,
        cost: i64,
        date: Day,
        genre: impl Into<String>,
    ) -> Self {
        let genre = genre.into();
        Self::new(title, cost, date, EventKind::Theatre { genre })
    }

    pub fn excursion<S: Into<String>>(
        title: impl Into<String>,
        cost: i64,
        date: Day,
        sights: impl IntoIterator<Item = S>,
    ) -> Self {
        let sights = sights.into_iter().map(Into::into).collect();
        Self::new(title, cost, date, EventKind::Excursion { sights })
    }

    /// Attach a free-text description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn date(&self) -> Day {
        self.date
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn attendees(&self) -> &[ChildId] {
        &self.attendees
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_attending(&self, child: ChildId) -> bool {
        self.attendees.contains(&child)
    }

    /// Add an attendee; returns false if already attending
    pub(crate) fn add_attendee(&mut self, child: ChildId) -> bool {
        if self.is_attending(child) {
            return false;
        }
        self.attendees.push(child);
        true
    }

    /// Remove an attendee; returns false if not attending
    pub(crate) fn remove_attendee(&mut self, child: ChildId) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|id| *id != child);
        self.attendees.len() != before
    }

    /// Drop every attendee, returning them in sign-up order
    pub(crate) fn take_attendees(&mut self) -> Vec<ChildId> {
        std::mem::take(&mut self.attendees)
    }
}
