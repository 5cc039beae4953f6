//! Schedule: the group's confirmed calendar
//!
//! Two views of the same data:
//! - `events`: every scheduled event in the order it was confirmed
//! - `timetable`: the same events bucketed by day
//!
//! # Critical Invariants
//!
//! 1. **Index Sync**: an event is in `events` iff it is in exactly one
//!    timetable bucket, the one for its date
//! 2. **Uniqueness**: an event is scheduled at most once

use crate::core::calendar::Day;
use crate::models::event::EventId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confirmed events indexed by day
///
/// # Example
/// ```
/// use group_outings_core::{Day, Schedule};
///
/// let schedule = Schedule::new();
/// assert!(schedule.on_day(Day::new(1).unwrap()).is_empty());
/// assert_eq!(schedule.booked_days().count(), 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    events: Vec<EventId>,

    /// Day -> events on that day, in confirmation order; no empty buckets
    timetable: BTreeMap<Day, Vec<EventId>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: EventId) -> bool {
        self.events.contains(&event)
    }

    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events confirmed for a day
    pub fn on_day(&self, day: Day) -> &[EventId] {
        self.timetable.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days with at least one event, in calendar order
    pub fn booked_days(&self) -> impl Iterator<Item = (Day, &[EventId])> {
        self.timetable
            .iter()
            .map(|(day, events)| (*day, events.as_slice()))
    }

    /// Returns false if the event was already scheduled
    pub(crate) fn insert(&mut self, event: EventId, date: Day) -> bool {
        if self.contains(event) {
            return false;
        }
        self.events.push(event);
        self.timetable.entry(date).or_default().push(event);
        true
    }

    /// Remove from both the flat list and the timetable
    ///
    /// Returns false if the event was not scheduled
    pub(crate) fn remove(&mut self, event: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|id| *id != event);
        if self.events.len() == before {
            return false;
        }

        self.timetable.retain(|_, bucket| {
            bucket.retain(|id| *id != event);
            !bucket.is_empty()
        });
        true
    }
}
