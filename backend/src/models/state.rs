//! Simulation State
//!
//! Owns every child, event and group of the simulation, indexed by id,
//! together with the activity log. Cross references between entities are
//! ids, never ownership: a group lists member ids, an event lists attendee
//! ids, a child points back to its group id.
//!
//! # Critical Invariants
//!
//! 1. **Single Membership**: a child is listed by at most one group, and
//!    its back-reference names exactly that group
//! 2. **Exclusive Placement**: an event is in at most one agenda or
//!    schedule across all groups, never both
//! 3. **Wallet Floor**: no wallet is ever negative

use crate::models::activity::{Activity, ActivityLog};
use crate::models::child::{Child, ChildId};
use crate::models::event::{Event, EventId};
use crate::models::group::{Group, GroupId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Which collection of a group currently holds an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    Agenda,
    Schedule,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Agenda => write!(f, "agenda"),
            Placement::Schedule => write!(f, "schedule"),
        }
    }
}

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use group_outings_core::{Child, Group, SimulationState};
///
/// let mut state = SimulationState::new();
/// let group = state.add_group(Group::new("Sunflowers"));
/// let bob = state.add_child(Child::with_wallet("Bob", 300));
///
/// assert_eq!(state.num_children(), 1);
/// assert_eq!(state.group(group).unwrap().count(), 0);
/// assert_eq!(state.child(bob).unwrap().wallet(), 300);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    children: HashMap<ChildId, Child>,

    events: HashMap<EventId, Event>,

    groups: HashMap<GroupId, Group>,

    log: ActivityLog,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a child, returning its id
    pub fn add_child(&mut self, child: Child) -> ChildId {
        let id = child.id();
        self.children.insert(id, child);
        id
    }

    /// Register an event, returning its id
    ///
    /// Registering does not place the event anywhere; write it to a
    /// group's agenda to propose it.
    pub fn add_event(&mut self, event: Event) -> EventId {
        let id = event.id();
        self.events.insert(id, event);
        id
    }

    /// Register a group, returning its id
    pub fn add_group(&mut self, group: Group) -> GroupId {
        let id = group.id();
        self.groups.insert(id, group);
        id
    }

    pub fn child(&self, id: ChildId) -> Option<&Child> {
        self.children.get(&id)
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut Child> {
        self.children.get_mut(&id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    pub(crate) fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.get_mut(&id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub(crate) fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    pub fn children(&self) -> impl Iterator<Item = &Child> {
        self.children.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    /// Look up a child by display name (first match)
    pub fn find_child(&self, name: &str) -> Option<ChildId> {
        self.children
            .values()
            .find(|child| child.name() == name)
            .map(Child::id)
    }

    /// Look up an event by title (first match)
    pub fn find_event(&self, title: &str) -> Option<EventId> {
        self.events
            .values()
            .find(|event| event.title() == title)
            .map(Event::id)
    }

    /// Find the group and collection currently holding an event
    ///
    /// Returns None for events that are registered but not placed.
    pub fn locate(&self, event: EventId) -> Option<(GroupId, Placement)> {
        self.groups.values().find_map(|group| {
            if group.agenda().contains(event) {
                Some((group.id(), Placement::Agenda))
            } else if group.schedule().contains(event) {
                Some((group.id(), Placement::Schedule))
            } else {
                None
            }
        })
    }

    /// Sum of every wallet
    pub fn total_wallets(&self) -> i64 {
        self.children.values().map(Child::wallet).sum()
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ActivityLog {
        &mut self.log
    }

    pub(crate) fn record(&mut self, activity: Activity) {
        self.log.log(activity);
    }

    /// Log a refused operation and hand the error back to the caller
    pub(crate) fn reject<E: fmt::Display>(&mut self, operation: &'static str, error: E) -> E {
        warn!(operation, reason = %error, "operation rejected");
        self.log.log(Activity::Rejected {
            operation,
            reason: error.to_string(),
        });
        error
    }

    /// Borrow a child and an event mutably at the same time
    pub(crate) fn child_and_event_mut(
        &mut self,
        child: ChildId,
        event: EventId,
    ) -> Option<(&mut Child, &mut Event)> {
        let child = self.children.get_mut(&child)?;
        let event = self.events.get_mut(&event)?;
        Some((child, event))
    }

    /// Refund every attendee of an event its cost and clear the attendee list
    ///
    /// Returns the refunded children in sign-up order.
    pub(crate) fn refund_attendees(&mut self, event: EventId) -> Vec<ChildId> {
        let Some(event) = self.events.get_mut(&event) else {
            return Vec::new();
        };
        let cost = event.cost();
        let attendees = event.take_attendees();
        for id in &attendees {
            if let Some(child) = self.children.get_mut(id) {
                child.credit(cost);
            }
        }
        attendees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::Day;

    #[test]
    fn test_locate_unplaced_event() {
        let mut state = SimulationState::new();
        let event = state.add_event(Event::theatre(
            "Aladdin",
            100,
            Day::new(10).unwrap(),
            "fairytale",
        ));
        state.add_group(Group::new("Sunflowers"));

        assert_eq!(state.locate(event), None);
    }

    #[test]
    fn test_refund_attendees_credits_cost() {
        let mut state = SimulationState::new();
        let bob = state.add_child(Child::with_wallet("Bob", 0));
        let sam = state.add_child(Child::with_wallet("Sam", 10));
        let event = state.add_event(Event::theatre(
            "The 3 bears",
            90,
            Day::new(3).unwrap(),
            "fairytale",
        ));
        state.event_mut(event).unwrap().add_attendee(bob);
        state.event_mut(event).unwrap().add_attendee(sam);

        let refunded = state.refund_attendees(event);

        assert_eq!(refunded, vec![bob, sam]);
        assert_eq!(state.child(bob).unwrap().wallet(), 90);
        assert_eq!(state.child(sam).unwrap().wallet(), 100);
        assert_eq!(state.event(event).unwrap().attendee_count(), 0);
    }

    #[test]
    fn test_reject_logs_and_returns_error() {
        let mut state = SimulationState::new();
        let err = state.reject("donate", "amount must be positive");

        assert_eq!(err, "amount must be positive");
        assert_eq!(
            state.log().last(),
            Some(&Activity::Rejected {
                operation: "donate",
                reason: "amount must be positive".to_string(),
            })
        );
    }

    #[test]
    fn test_find_by_name_and_title() {
        let mut state = SimulationState::new();
        let pam = state.add_child(Child::new("Pam"));
        let park = state.add_event(Event::excursion(
            "The national park",
            30,
            Day::new(15).unwrap(),
            ["park"],
        ));

        assert_eq!(state.find_child("Pam"), Some(pam));
        assert_eq!(state.find_child("Nobody"), None);
        assert_eq!(state.find_event("The national park"), Some(park));
    }
}
