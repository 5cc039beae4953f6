//! Activity logging for auditing and tests.
//!
//! Every operation on the simulation, whether it succeeds or is rejected,
//! appends an [`Activity`] to the state's [`ActivityLog`]. The log is the
//! observable record of what happened: tests assert against it instead of
//! matching printed text.
//!
//! # Example
//!
//! ```rust
//! use group_outings_core::models::activity::{Activity, ActivityLog};
//! use group_outings_core::models::{ChildId, EventId};
//!
//! let mut log = ActivityLog::new();
//! log.log(Activity::Subscribed {
//!     child: ChildId::new(),
//!     event: EventId::new(),
//!     prepaid: 120,
//! });
//!
//! assert_eq!(log.of_type("Subscribed").len(), 1);
//! ```

use crate::core::calendar::Day;
use crate::models::child::ChildId;
use crate::models::event::EventId;
use crate::models::group::GroupId;
use serde::Serialize;

/// A state change (or rejected attempt) in the simulation.
///
/// Activities are logged in the order they occur.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Activity {
    /// Child joined a group
    Joined { group: GroupId, child: ChildId },

    /// Child left a group; pending subscriptions were refunded
    Left {
        group: GroupId,
        child: ChildId,
        refunded: i64,
    },

    /// Event added to a group's agenda
    AgendaWritten { group: GroupId, event: EventId },

    /// Event removed from a group's agenda
    AgendaRemoved { group: GroupId, event: EventId },

    /// Event added to a group's schedule
    ScheduleWritten {
        group: GroupId,
        event: EventId,
        date: Day,
    },

    /// Event removed from a group's schedule
    ScheduleRemoved { group: GroupId, event: EventId },

    /// Child subscribed to a pending event and prepaid its cost
    Subscribed {
        child: ChildId,
        event: EventId,
        prepaid: i64,
    },

    /// Child withdrew from a pending event and got its cost back
    Unsubscribed {
        child: ChildId,
        event: EventId,
        refunded: i64,
    },

    /// Child bought a ticket to a scheduled event
    TicketBought {
        child: ChildId,
        event: EventId,
        paid: i64,
    },

    /// Pocket money added to a wallet
    Donated {
        child: ChildId,
        amount: i64,
        balance: i64,
    },

    /// Quorum reached: event moved from the agenda to the schedule
    Promoted {
        group: GroupId,
        event: EventId,
        date: Day,
        attendees: usize,
    },

    /// Pending event dropped because the group already has plans that day
    ConflictDropped {
        group: GroupId,
        event: EventId,
        date: Day,
        refunded: Vec<ChildId>,
        amount: i64,
    },

    /// Event cancelled and every attendee refunded
    Cancelled {
        event: EventId,
        refunded: Vec<ChildId>,
        amount: i64,
    },

    /// Operation refused; nothing changed
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

impl Activity {
    /// Get a short description of the activity type
    pub fn activity_type(&self) -> &'static str {
        match self {
            Activity::Joined { .. } => "Joined",
            Activity::Left { .. } => "Left",
            Activity::AgendaWritten { .. } => "AgendaWritten",
            Activity::AgendaRemoved { .. } => "AgendaRemoved",
            Activity::ScheduleWritten { .. } => "ScheduleWritten",
            Activity::ScheduleRemoved { .. } => "ScheduleRemoved",
            Activity::Subscribed { .. } => "Subscribed",
            Activity::Unsubscribed { .. } => "Unsubscribed",
            Activity::TicketBought { .. } => "TicketBought",
            Activity::Donated { .. } => "Donated",
            Activity::Promoted { .. } => "Promoted",
            Activity::ConflictDropped { .. } => "ConflictDropped",
            Activity::Cancelled { .. } => "Cancelled",
            Activity::Rejected { .. } => "Rejected",
        }
    }

    /// Check whether this activity concerns a specific child
    ///
    /// Refund lists are included: a child refunded by a dropped or
    /// cancelled event is affected by it.
    pub fn involves_child(&self, id: ChildId) -> bool {
        match self {
            Activity::Joined { child, .. }
            | Activity::Left { child, .. }
            | Activity::Subscribed { child, .. }
            | Activity::Unsubscribed { child, .. }
            | Activity::TicketBought { child, .. }
            | Activity::Donated { child, .. } => *child == id,
            Activity::ConflictDropped { refunded, .. } | Activity::Cancelled { refunded, .. } => {
                refunded.contains(&id)
            }
            _ => false,
        }
    }

    /// Get the event ID if this activity relates to an event
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Activity::AgendaWritten { event, .. }
            | Activity::AgendaRemoved { event, .. }
            | Activity::ScheduleWritten { event, .. }
            | Activity::ScheduleRemoved { event, .. }
            | Activity::Subscribed { event, .. }
            | Activity::Unsubscribed { event, .. }
            | Activity::TicketBought { event, .. }
            | Activity::Promoted { event, .. }
            | Activity::ConflictDropped { event, .. }
            | Activity::Cancelled { event, .. } => Some(*event),
            _ => None,
        }
    }
}

/// Log for storing and querying simulation activity.
///
/// This is a simple wrapper around Vec<Activity> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<Activity>,
}

impl ActivityLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an activity to the log
    pub fn log(&mut self, activity: Activity) {
        self.entries.push(activity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all activity in logging order
    pub fn entries(&self) -> &[Activity] {
        &self.entries
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&Activity> {
        self.entries.last()
    }

    /// Get activity of a specific type
    pub fn of_type(&self, activity_type: &str) -> Vec<&Activity> {
        self.entries
            .iter()
            .filter(|a| a.activity_type() == activity_type)
            .collect()
    }

    /// Get activity involving a specific child
    pub fn for_child(&self, id: ChildId) -> Vec<&Activity> {
        self.entries
            .iter()
            .filter(|a| a.involves_child(id))
            .collect()
    }

    /// Get activity for a specific event
    pub fn for_event(&self, id: EventId) -> Vec<&Activity> {
        self.entries
            .iter()
            .filter(|a| a.event_id() == Some(id))
            .collect()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
