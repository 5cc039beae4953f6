//! Group model
//!
//! A group owns its member list, one agenda of pending events and one
//! schedule of confirmed events. Children and events themselves live in
//! [`SimulationState`](crate::models::state::SimulationState); the group
//! only holds their ids.

use crate::models::agenda::Agenda;
use crate::models::child::ChildId;
use crate::models::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group_{}", self.0.simple())
    }
}

/// A children's group
///
/// # Example
/// ```
/// use group_outings_core::Group;
///
/// let group = Group::new("Sunflowers");
/// assert_eq!(group.count(), 0);
/// assert!(group.agenda().is_empty());
/// assert!(group.schedule().is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,

    name: String,

    /// Members in joining order, no duplicates
    members: Vec<ChildId>,

    schedule: Schedule,

    agenda: Agenda,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            members: Vec::new(),
            schedule: Schedule::new(),
            agenda: Agenda::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[ChildId] {
        &self.members
    }

    /// Number of members
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, child: ChildId) -> bool {
        self.members.contains(&child)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    /// Whether `attendees` is strictly more than a third of the group
    ///
    /// Compared as `attendees * 3 > count` to stay in integers.
    ///
    /// # Example
    /// ```
    /// use group_outings_core::Group;
    ///
    /// // An empty group never reaches quorum on zero attendees
    /// assert!(!Group::new("Tulips").quorum_reached(0));
    /// ```
    pub fn quorum_reached(&self, attendees: usize) -> bool {
        attendees * 3 > self.count()
    }

    pub(crate) fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    pub(crate) fn agenda_mut(&mut self) -> &mut Agenda {
        &mut self.agenda
    }

    /// Returns false if the child was already a member
    pub(crate) fn add_member(&mut self, child: ChildId) -> bool {
        if self.is_member(child) {
            return false;
        }
        self.members.push(child);
        true
    }

    /// Returns false if the child was not a member
    pub(crate) fn remove_member(&mut self, child: ChildId) -> bool {
        let before = self.members.len();
        self.members.retain(|id| *id != child);
        self.members.len() != before
    }
}
