//! Agenda: events proposed to the group and waiting for quorum

use crate::models::event::EventId;
use serde::{Deserialize, Serialize};

/// Pending events in the order they were proposed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agenda {
    events: Vec<EventId>,
}

impl Agenda {
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

    /// Returns false if the event was already pending
    pub(crate) fn insert(&mut self, event: EventId) -> bool {
        if self.contains(event) {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Returns false if the event was not pending
    pub(crate) fn remove(&mut self, event: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|id| *id != event);
        self.events.len() != before
    }
}
