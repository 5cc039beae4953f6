//! Subscribing to pending events
//!
//! Subscribing prepays the event cost and immediately re-evaluates the
//! agenda quorum, so the subscription that tips an event over a third of
//! the group is the one that confirms it. Unsubscribing refunds the cost
//! but never re-evaluates: a confirmed event stays confirmed.

use crate::booking::{Booking, BookingError};
use crate::models::activity::Activity;
use crate::models::child::ChildId;
use crate::models::event::EventId;
use crate::models::state::{Placement, SimulationState};
use crate::planning::quorum::{announce, Promotion};
use tracing::info;

/// Subscribe a child to a pending event, prepaying its cost
///
/// Returns the promotion if this subscription brought the event to quorum.
///
/// # Errors
/// - `NotAMember` if the child is not in a group
/// - `AlreadyScheduled` if the event is confirmed (buy a ticket instead)
/// - `EventNotFound` if the event is in neither the agenda nor the schedule
/// - `AlreadySubscribed` if the child is already attending
/// - `Wallet(InsufficientFunds)` if the wallet is short; nothing changes
pub fn subscribe(
    state: &mut SimulationState,
    child_id: ChildId,
    event_id: EventId,
) -> Result<Option<Promotion>, BookingError> {
    let Booking {
        name,
        group,
        title,
        cost,
        placement,
    } = Booking::resolve(state, "subscribe", child_id, event_id)?;

    match placement {
        Some(Placement::Agenda) => {}
        Some(Placement::Schedule) => {
            return Err(state.reject("subscribe", BookingError::AlreadyScheduled { title }));
        }
        None => return Err(state.reject("subscribe", BookingError::EventNotFound { title })),
    }

    let outcome = match state.child_and_event_mut(child_id, event_id) {
        Some((_, event)) if event.is_attending(child_id) => {
            Err(BookingError::AlreadySubscribed {
                name: name.clone(),
                title: title.clone(),
            })
        }
        Some((child, event)) => child
            .debit(cost)
            .map(|()| {
                event.add_attendee(child_id);
            })
            .map_err(BookingError::from),
        None => Err(BookingError::UnknownEvent(event_id)),
    };
    outcome.map_err(|err| state.reject("subscribe", err))?;

    info!(child = %name, event = %title, prepaid = cost, "subscribed");
    state.record(Activity::Subscribed {
        child: child_id,
        event: event_id,
        prepaid: cost,
    });

    Ok(announce(state, group, event_id)?)
}

/// Withdraw a child from a pending event, refunding its cost
///
/// Returns the refunded amount.
pub fn unsubscribe(
    state: &mut SimulationState,
    child_id: ChildId,
    event_id: EventId,
) -> Result<i64, BookingError> {
    let Booking {
        name,
        title,
        cost,
        placement,
        ..
    } = Booking::resolve(state, "unsubscribe", child_id, event_id)?;

    match placement {
        Some(Placement::Agenda) => {}
        Some(Placement::Schedule) => {
            return Err(state.reject("unsubscribe", BookingError::AlreadyScheduled { title }));
        }
        None => {
            return Err(state.reject("unsubscribe", BookingError::EventNotFound { title }));
        }
    }

    let withdrawn = match state.child_and_event_mut(child_id, event_id) {
        Some((child, event)) => {
            let removed = event.remove_attendee(child_id);
            if removed {
                child.credit(cost);
            }
            removed
        }
        None => false,
    };
    if !withdrawn {
        return Err(state.reject(
            "unsubscribe",
            BookingError::NotSubscribed { name, title },
        ));
    }

    info!(child = %name, event = %title, refunded = cost, "unsubscribed");
    state.record(Activity::Unsubscribed {
        child: child_id,
        event: event_id,
        refunded: cost,
    });
    Ok(cost)
}
