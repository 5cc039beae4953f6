//! Buying tickets to confirmed events
//!
//! Once an event is on the schedule there is no quorum left to reach:
//! any member with enough money can buy a ticket. Purchases are final.

use crate::booking::{Booking, BookingError};
use crate::models::activity::Activity;
use crate::models::child::ChildId;
use crate::models::event::EventId;
use crate::models::state::{Placement, SimulationState};
use tracing::info;

/// Buy a ticket to a scheduled event
///
/// # Errors
/// - `NotAMember` if the child is not in a group
/// - `StillPending` if the event is on the agenda (subscribe instead)
/// - `EventNotFound` if the event is in neither the agenda nor the schedule
/// - `AlreadyBought` if the child is already attending
/// - `Wallet(InsufficientFunds)` if the wallet is short; nothing changes
pub fn buy(
    state: &mut SimulationState,
    child_id: ChildId,
    event_id: EventId,
) -> Result<(), BookingError> {
    let Booking {
        name,
        title,
        cost,
        placement,
        ..
    } = Booking::resolve(state, "buy", child_id, event_id)?;

    match placement {
        Some(Placement::Schedule) => {}
        Some(Placement::Agenda) => {
            return Err(state.reject("buy", BookingError::StillPending { title }));
        }
        None => return Err(state.reject("buy", BookingError::EventNotFound { title })),
    }

    let outcome = match state.child_and_event_mut(child_id, event_id) {
        Some((_, event)) if event.is_attending(child_id) => Err(BookingError::AlreadyBought {
            name: name.clone(),
            title: title.clone(),
        }),
        Some((child, event)) => child
            .debit(cost)
            .map(|()| {
                event.add_attendee(child_id);
            })
            .map_err(BookingError::from),
        None => Err(BookingError::UnknownEvent(event_id)),
    };
    outcome.map_err(|err| state.reject("buy", err))?;

    info!(child = %name, event = %title, paid = cost, "bought ticket");
    state.record(Activity::TicketBought {
        child: child_id,
        event: event_id,
        paid: cost,
    });
    Ok(())
}
