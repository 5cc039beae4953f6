//! Domain models for the group outings simulator

pub mod activity;
pub mod agenda;
pub mod child;
pub mod event;
pub mod group;
pub mod schedule;
pub mod state;

// Re-exports
pub use activity::{Activity, ActivityLog};
pub use agenda::Agenda;
pub use child::{Child, ChildId, WalletError};
pub use event::{Event, EventId, EventKind};
pub use group::{Group, GroupId};
pub use schedule::Schedule;
pub use state::{Placement, SimulationState};
