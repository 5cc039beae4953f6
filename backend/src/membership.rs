//! Group membership: joining and leaving
//!
//! A child belongs to at most one group. Joining sets the child's
//! back-reference; leaving clears it and withdraws the child from every
//! event still pending on the group's agenda, refunding the prepaid cost.
//! Tickets already bought for scheduled events are kept.

use crate::models::activity::Activity;
use crate::models::child::ChildId;
use crate::models::group::GroupId;
use crate::models::state::SimulationState;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when changing group membership
#[derive(Debug, Error, PartialEq)]
pub enum MembershipError {
    #[error("Group not found: {0}")]
    UnknownGroup(GroupId),

    #[error("Child not found: {0}")]
    UnknownChild(ChildId),

    #[error("{name} is already in the group")]
    AlreadyMember { name: String },

    #[error("{name} already belongs to another group ({group})")]
    InAnotherGroup { name: String, group: GroupId },

    #[error("{name} is not in the group")]
    NotAMember { name: String },
}

/// Add a child to a group
///
/// # Example
/// ```
/// use group_outings_core::{membership, Child, Group, SimulationState};
///
/// let mut state = SimulationState::new();
/// let group = state.add_group(Group::new("Sunflowers"));
/// let bob = state.add_child(Child::new("Bob"));
///
/// membership::join(&mut state, group, bob).unwrap();
/// assert_eq!(state.child(bob).unwrap().group(), Some(group));
/// assert!(membership::join(&mut state, group, bob).is_err());
/// ```
pub fn join(
    state: &mut SimulationState,
    group_id: GroupId,
    child_id: ChildId,
) -> Result<(), MembershipError> {
    if state.group(group_id).is_none() {
        return Err(state.reject("join", MembershipError::UnknownGroup(group_id)));
    }
    let (name, current) = match state.child(child_id) {
        Some(child) => (child.name().to_string(), child.group()),
        None => return Err(state.reject("join", MembershipError::UnknownChild(child_id))),
    };

    match current {
        Some(group) if group == group_id => {
            return Err(state.reject("join", MembershipError::AlreadyMember { name }));
        }
        Some(group) => {
            return Err(state.reject("join", MembershipError::InAnotherGroup { name, group }));
        }
        None => {}
    }

    if let Some(group) = state.group_mut(group_id) {
        group.add_member(child_id);
    }
    if let Some(child) = state.child_mut(child_id) {
        child.set_group(Some(group_id));
    }

    info!(child = %name, group = %group_id, "joined group");
    state.record(Activity::Joined {
        group: group_id,
        child: child_id,
    });
    Ok(())
}

/// Remove a child from a group
///
/// Returns the total refunded for pending subscriptions.
pub fn leave(
    state: &mut SimulationState,
    group_id: GroupId,
    child_id: ChildId,
) -> Result<i64, MembershipError> {
    let Some(group) = state.group(group_id) else {
        return Err(state.reject("leave", MembershipError::UnknownGroup(group_id)));
    };
    let is_member = group.is_member(child_id);
    let pending: Vec<_> = group.agenda().events().to_vec();

    let name = match state.child(child_id) {
        Some(child) => child.name().to_string(),
        None => return Err(state.reject("leave", MembershipError::UnknownChild(child_id))),
    };
    if !is_member {
        return Err(state.reject("leave", MembershipError::NotAMember { name }));
    }

    let mut refunded = 0;
    for event_id in pending {
        let Some((child, event)) = state.child_and_event_mut(child_id, event_id) else {
            continue;
        };
        if event.remove_attendee(child_id) {
            let cost = event.cost();
            child.credit(cost);
            refunded += cost;
            state.record(Activity::Unsubscribed {
                child: child_id,
                event: event_id,
                refunded: cost,
            });
        }
    }

    if let Some(group) = state.group_mut(group_id) {
        group.remove_member(child_id);
    }
    if let Some(child) = state.child_mut(child_id) {
        child.set_group(None);
    }

    info!(child = %name, group = %group_id, refunded, "left group");
    state.record(Activity::Left {
        group: group_id,
        child: child_id,
        refunded,
    });
    Ok(refunded)
}
