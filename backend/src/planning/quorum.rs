//! Quorum promotion from agenda to schedule
//!
//! A pending event is confirmed as soon as strictly more than a third of
//! the group has subscribed to it. The group can only go to one outing a
//! day, so every other pending event on the same date is dropped: its
//! attendees get their prepaid cost back and it leaves the agenda. The
//! same sweep runs when an event is written straight to the schedule.
//!
//! Promotion is one-way. Unsubscribing later never demotes an event.

use crate::core::calendar::Day;
use crate::models::activity::Activity;
use crate::models::child::ChildId;
use crate::models::event::EventId;
use crate::models::group::GroupId;
use crate::models::state::SimulationState;
use crate::planning::PlanningError;
use tracing::{debug, info};

/// Pending event dropped because of a same-day promotion
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedEvent {
    pub event: EventId,

    /// Attendees that were refunded, in sign-up order
    pub refunded: Vec<ChildId>,

    /// Amount refunded to each attendee
    pub amount: i64,
}

/// Result of a successful quorum check
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    pub event: EventId,
    pub date: Day,
    pub attendees: usize,
    pub dropped: Vec<DroppedEvent>,
}

/// Promote a pending event to the schedule if it has reached quorum
///
/// Returns `Ok(None)` when the event stays pending.
///
/// # Example
/// ```
/// use group_outings_core::{booking, membership, planning, Child, Day, Event, Group, SimulationState};
///
/// let mut state = SimulationState::new();
/// let group = state.add_group(Group::new("Sunflowers"));
/// let bob = state.add_child(Child::with_wallet("Bob", 100));
/// let sam = state.add_child(Child::with_wallet("Sam", 100));
/// membership::join(&mut state, group, bob).unwrap();
/// membership::join(&mut state, group, sam).unwrap();
///
/// let park = state.add_event(Event::excursion("The national park", 30, Day::new(15).unwrap(), ["park"]));
/// planning::write_agenda(&mut state, group, park).unwrap();
///
/// // One of two members is more than a third: subscribing promotes it
/// let promotion = booking::subscribe(&mut state, bob, park).unwrap();
/// assert!(promotion.is_some());
/// assert!(state.group(group).unwrap().schedule().contains(park));
/// assert!(!state.group(group).unwrap().agenda().contains(park));
/// ```
pub fn announce(
    state: &mut SimulationState,
    group_id: GroupId,
    event_id: EventId,
) -> Result<Option<Promotion>, PlanningError> {
    let Some(group) = state.group(group_id) else {
        return Err(state.reject("announce", PlanningError::UnknownGroup(group_id)));
    };
    let pending = group.agenda().contains(event_id);
    let count = group.count();

    let (title, date, attendees) = match state.event(event_id) {
        Some(event) => {
            // Only current members count towards this group's quorum
            let attendees = event
                .attendees()
                .iter()
                .filter(|child| group.is_member(**child))
                .count();
            (event.title().to_string(), event.date(), attendees)
        }
        None => return Err(state.reject("announce", PlanningError::UnknownEvent(event_id))),
    };
    if !pending {
        return Err(state.reject("announce", PlanningError::NotInAgenda { title }));
    }
    if !group.schedule().on_day(date).is_empty() {
        return Err(state.reject("announce", PlanningError::DayBooked { title, date }));
    }

    if !group.quorum_reached(attendees) {
        debug!(event = %title, attendees, members = count, "quorum not reached");
        return Ok(None);
    }

    if let Some(group) = state.group_mut(group_id) {
        group.agenda_mut().remove(event_id);
        group.schedule_mut().insert(event_id, date);
    }

    info!(event = %title, %date, attendees, members = count, "group will be attending");
    state.record(Activity::Promoted {
        group: group_id,
        event: event_id,
        date,
        attendees,
    });

    let dropped = drop_same_day(state, group_id, date);

    Ok(Some(Promotion {
        event: event_id,
        date,
        attendees,
        dropped,
    }))
}

/// Drop every pending event on `date` from the group's agenda
///
/// Each dropped event's attendees get its cost back and the attendee list
/// is cleared.
pub(crate) fn drop_same_day(
    state: &mut SimulationState,
    group_id: GroupId,
    date: Day,
) -> Vec<DroppedEvent> {
    let conflicts: Vec<EventId> = match state.group(group_id) {
        Some(group) => group.agenda().events().to_vec(),
        None => return Vec::new(),
    };

    let mut dropped = Vec::new();
    for other in conflicts {
        let Some((other_title, amount)) = state
            .event(other)
            .filter(|event| event.date() == date)
            .map(|event| (event.title().to_string(), event.cost()))
        else {
            continue;
        };

        if let Some(group) = state.group_mut(group_id) {
            group.agenda_mut().remove(other);
        }
        let refunded = state.refund_attendees(other);

        info!(
            event = %other_title,
            %date,
            refunded = refunded.len(),
            amount,
            "group already has plans that day, money returned"
        );
        state.record(Activity::ConflictDropped {
            group: group_id,
            event: other,
            date,
            refunded: refunded.clone(),
            amount,
        });
        dropped.push(DroppedEvent {
            event: other,
            refunded,
            amount,
        });
    }
    dropped
}
