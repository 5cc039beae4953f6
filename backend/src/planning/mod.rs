//! Planning: placing events on a group's agenda or schedule
//!
//! # Placement Rules
//!
//! - An event is either unplaced, pending on one group's agenda, or
//!   confirmed on one group's schedule. Never two of these at once.
//! - Events reach the schedule through quorum promotion
//!   ([`announce`]) or an explicit [`write_schedule`] of an unplaced event.
//! - The group goes on at most one outing a day: a day with a scheduled
//!   event accepts no further events, and scheduling an event drops the
//!   pending events on its date.
//! - Withdrawing a pending event refunds its subscribers. Taking an event
//!   off the schedule keeps ticket holders attached; [`cancel_event`]
//!   refunds them.

pub mod quorum;

use crate::core::calendar::Day;
use crate::models::activity::Activity;
use crate::models::child::ChildId;
use crate::models::event::EventId;
use crate::models::group::GroupId;
use crate::models::state::{Placement, SimulationState};
use thiserror::Error;
use tracing::info;

pub use quorum::{announce, DroppedEvent, Promotion};

use quorum::drop_same_day;

/// Errors that can occur while planning events
#[derive(Debug, Error, PartialEq)]
pub enum PlanningError {
    #[error("Group not found: {0}")]
    UnknownGroup(GroupId),

    #[error("Event not found: {0}")]
    UnknownEvent(EventId),

    #[error("Event '{title}' is already in the agenda")]
    AlreadyInAgenda { title: String },

    #[error("Event '{title}' is already in the group schedule")]
    AlreadyScheduled { title: String },

    #[error("Event '{title}' is held by another group ({group})")]
    HeldByAnotherGroup { title: String, group: GroupId },

    #[error("Group already has plans on day {date}, '{title}' cannot be added")]
    DayBooked { title: String, date: Day },

    #[error("Event '{title}' not found in the agenda")]
    NotInAgenda { title: String },

    #[error("Event '{title}' not found in the schedule")]
    NotInSchedule { title: String },
}

/// Check that both ids exist and return the event title
fn resolve(
    state: &mut SimulationState,
    operation: &'static str,
    group_id: GroupId,
    event_id: EventId,
) -> Result<String, PlanningError> {
    if state.group(group_id).is_none() {
        return Err(state.reject(operation, PlanningError::UnknownGroup(group_id)));
    }
    match state.event(event_id) {
        Some(event) => Ok(event.title().to_string()),
        None => Err(state.reject(operation, PlanningError::UnknownEvent(event_id))),
    }
}

/// Like [`resolve`], additionally requiring the event to be unplaced
fn resolve_unplaced(
    state: &mut SimulationState,
    operation: &'static str,
    group_id: GroupId,
    event_id: EventId,
) -> Result<String, PlanningError> {
    let title = resolve(state, operation, group_id, event_id)?;
    let err = match state.locate(event_id) {
        None => return Ok(title),
        Some((group, _)) if group != group_id => {
            PlanningError::HeldByAnotherGroup { title, group }
        }
        Some((_, Placement::Agenda)) => PlanningError::AlreadyInAgenda { title },
        Some((_, Placement::Schedule)) => PlanningError::AlreadyScheduled { title },
    };
    Err(state.reject(operation, err))
}

/// Reject events whose date already has a scheduled outing in the group
fn ensure_day_free(
    state: &mut SimulationState,
    operation: &'static str,
    group_id: GroupId,
    event_id: EventId,
    title: String,
) -> Result<(String, Day), PlanningError> {
    let Some(date) = state.event(event_id).map(|event| event.date()) else {
        return Err(state.reject(operation, PlanningError::UnknownEvent(event_id)));
    };
    let booked = state
        .group(group_id)
        .map_or(false, |group| !group.schedule().on_day(date).is_empty());
    if booked {
        return Err(state.reject(operation, PlanningError::DayBooked { title, date }));
    }
    Ok((title, date))
}

/// Propose an event to the group by adding it to the agenda
///
/// # Example
/// ```
/// use group_outings_core::{planning, Day, Event, Group, SimulationState};
///
/// let mut state = SimulationState::new();
/// let group = state.add_group(Group::new("Sunflowers"));
/// let event = state.add_event(Event::theatre("Aladdin", 100, Day::new(10).unwrap(), "fairytale"));
///
/// planning::write_agenda(&mut state, group, event).unwrap();
/// assert!(state.group(group).unwrap().agenda().contains(event));
///
/// // Already pending
/// assert!(planning::write_agenda(&mut state, group, event).is_err());
/// ```
pub fn write_agenda(
    state: &mut SimulationState,
    group_id: GroupId,
    event_id: EventId,
) -> Result<(), PlanningError> {
    let title = resolve_unplaced(state, "write_agenda", group_id, event_id)?;
    let (title, _) = ensure_day_free(state, "write_agenda", group_id, event_id, title)?;

    if let Some(group) = state.group_mut(group_id) {
        group.agenda_mut().insert(event_id);
    }

    info!(event = %title, group = %group_id, "added to agenda");
    state.record(Activity::AgendaWritten {
        group: group_id,
        event: event_id,
    });
    Ok(())
}

/// Withdraw a pending event from the agenda
///
/// Subscribers get their prepaid cost back. Returns the refunded children
/// in sign-up order.
pub fn remove_from_agenda(
    state: &mut SimulationState,
    group_id: GroupId,
    event_id: EventId,
) -> Result<Vec<ChildId>, PlanningError> {
    let title = resolve(state, "remove_from_agenda", group_id, event_id)?;

    let removed = state
        .group_mut(group_id)
        .map_or(false, |group| group.agenda_mut().remove(event_id));
    if !removed {
        return Err(state.reject("remove_from_agenda", PlanningError::NotInAgenda { title }));
    }

    let cost = state.event(event_id).map_or(0, |event| event.cost());
    let refunded = state.refund_attendees(event_id);
    for child in &refunded {
        state.record(Activity::Unsubscribed {
            child: *child,
            event: event_id,
            refunded: cost,
        });
    }

    info!(event = %title, group = %group_id, refunded = refunded.len(), "removed from agenda");
    state.record(Activity::AgendaRemoved {
        group: group_id,
        event: event_id,
    });
    Ok(refunded)
}

/// Confirm an unplaced event directly on the group schedule
///
/// Pending events are rejected: they reach the schedule through
/// [`announce`] once enough of the group has subscribed. Pending events on
/// the same date are dropped and their subscribers refunded.
pub fn write_schedule(
    state: &mut SimulationState,
    group_id: GroupId,
    event_id: EventId,
) -> Result<Vec<DroppedEvent>, PlanningError> {
    let title = resolve_unplaced(state, "write_schedule", group_id, event_id)?;
    let (title, date) = ensure_day_free(state, "write_schedule", group_id, event_id, title)?;

    if let Some(group) = state.group_mut(group_id) {
        group.schedule_mut().insert(event_id, date);
    }

    info!(event = %title, group = %group_id, %date, "added to schedule");
    state.record(Activity::ScheduleWritten {
        group: group_id,
        event: event_id,
        date,
    });
    Ok(drop_same_day(state, group_id, date))
}

/// Take an event off the schedule, keeping the timetable in sync
///
/// Ticket holders keep their place on the event's attendee list.
pub fn remove_from_schedule(
    state: &mut SimulationState,
    group_id: GroupId,
    event_id: EventId,
) -> Result<(), PlanningError> {
    let title = resolve(state, "remove_from_schedule", group_id, event_id)?;

    let removed = state
        .group_mut(group_id)
        .map_or(false, |group| group.schedule_mut().remove(event_id));
    if !removed {
        return Err(state.reject(
            "remove_from_schedule",
            PlanningError::NotInSchedule { title },
        ));
    }

    info!(event = %title, group = %group_id, "removed from schedule");
    state.record(Activity::ScheduleRemoved {
        group: group_id,
        event: event_id,
    });
    Ok(())
}

/// Cancel an event wherever it is placed and refund every attendee
///
/// Subscribers and ticket holders alike get the event cost back. Returns
/// the refunded children in sign-up order.
pub fn cancel_event(
    state: &mut SimulationState,
    event_id: EventId,
) -> Result<Vec<ChildId>, PlanningError> {
    let (title, cost) = match state.event(event_id) {
        Some(event) => (event.title().to_string(), event.cost()),
        None => return Err(state.reject("cancel_event", PlanningError::UnknownEvent(event_id))),
    };

    if let Some((group_id, placement)) = state.locate(event_id) {
        if let Some(group) = state.group_mut(group_id) {
            match placement {
                Placement::Agenda => group.agenda_mut().remove(event_id),
                Placement::Schedule => group.schedule_mut().remove(event_id),
            };
        }
        state.record(match placement {
            Placement::Agenda => Activity::AgendaRemoved {
                group: group_id,
                event: event_id,
            },
            Placement::Schedule => Activity::ScheduleRemoved {
                group: group_id,
                event: event_id,
            },
        });
    }

    let refunded = state.refund_attendees(event_id);

    info!(event = %title, refunded = refunded.len(), cost, "event cancelled");
    state.record(Activity::Cancelled {
        event: event_id,
        refunded: refunded.clone(),
        amount: cost,
    });
    Ok(refunded)
}
