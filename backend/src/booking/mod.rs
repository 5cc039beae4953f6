//! Booking: how children pay for events
//!
//! # Booking Flow
//!
//! ```text
//! Agenda (pending)                      Schedule (confirmed)
//!   subscribe  -> prepay, attend   --quorum-->   buy -> pay, attend
//!   unsubscribe -> refund, leave                 (no refunds)
//! ```
//!
//! Every booking requires the child to be a member of a group, and only
//! looks at that group's agenda and schedule. Using the wrong operation
//! for where the event currently is gets a distinct error pointing at the
//! right one.

pub mod subscription;
pub mod tickets;

use crate::models::activity::Activity;
use crate::models::child::{ChildId, WalletError};
use crate::models::event::EventId;
use crate::models::group::GroupId;
use crate::models::state::{Placement, SimulationState};
use crate::planning::PlanningError;
use thiserror::Error;
use tracing::info;

pub use subscription::{subscribe, unsubscribe};
pub use tickets::buy;

/// Errors that can occur during booking operations
#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("Child not found: {0}")]
    UnknownChild(ChildId),

    #[error("Event not found: {0}")]
    UnknownEvent(EventId),

    #[error("{name} is not in a group")]
    NotAMember { name: String },

    #[error("No event found for '{title}'")]
    EventNotFound { title: String },

    #[error("Event '{title}' is already in the schedule, buy a ticket instead")]
    AlreadyScheduled { title: String },

    #[error("Event '{title}' is still on the agenda, subscribe instead")]
    StillPending { title: String },

    #[error("{name} already subscribed to '{title}'")]
    AlreadySubscribed { name: String, title: String },

    #[error("{name} was not subscribed to '{title}'")]
    NotSubscribed { name: String, title: String },

    #[error("{name} already bought a ticket to '{title}'")]
    AlreadyBought { name: String, title: String },

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Planning(#[from] PlanningError),
}

/// A child/event pair resolved against the child's group
pub(crate) struct Booking {
    pub name: String,
    pub group: GroupId,
    pub title: String,
    pub cost: i64,

    /// Where the event sits in the child's group, None if not there
    pub placement: Option<Placement>,
}

impl Booking {
    pub(crate) fn resolve(
        state: &mut SimulationState,
        operation: &'static str,
        child_id: ChildId,
        event_id: EventId,
    ) -> Result<Self, BookingError> {
        let (name, group) = match state.child(child_id) {
            Some(child) => (child.name().to_string(), child.group()),
            None => return Err(state.reject(operation, BookingError::UnknownChild(child_id))),
        };
        let (title, cost) = match state.event(event_id) {
            Some(event) => (event.title().to_string(), event.cost()),
            None => return Err(state.reject(operation, BookingError::UnknownEvent(event_id))),
        };
        let Some(group) = group else {
            return Err(state.reject(operation, BookingError::NotAMember { name }));
        };

        let placement = state
            .locate(event_id)
            .filter(|(holder, _)| *holder == group)
            .map(|(_, placement)| placement);

        Ok(Self {
            name,
            group,
            title,
            cost,
            placement,
        })
    }
}

/// Add pocket money to a child's wallet
///
/// Returns the new balance. Non-positive amounts are rejected and leave
/// the wallet untouched.
///
/// # Example
/// ```
/// use group_outings_core::{booking, Child, SimulationState};
///
/// let mut state = SimulationState::new();
/// let amy = state.add_child(Child::with_wallet("Amy", 100));
///
/// assert_eq!(booking::donate(&mut state, amy, 300), Ok(400));
/// assert!(booking::donate(&mut state, amy, -50).is_err());
/// assert_eq!(state.child(amy).unwrap().wallet(), 400);
/// ```
pub fn donate(
    state: &mut SimulationState,
    child_id: ChildId,
    amount: i64,
) -> Result<i64, BookingError> {
    let result = match state.child_mut(child_id) {
        Some(child) => child
            .donate(amount)
            .map(|balance| (child.name().to_string(), balance))
            .map_err(BookingError::from),
        None => Err(BookingError::UnknownChild(child_id)),
    };
    let (name, balance) = result.map_err(|err| state.reject("donate", err))?;

    info!(child = %name, amount, balance, "donated");
    state.record(Activity::Donated {
        child: child_id,
        amount,
        balance,
    });
    Ok(balance)
}
