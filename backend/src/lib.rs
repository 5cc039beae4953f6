//! Group Outings Core - Rust Engine
//!
//! In-memory simulation of a children's group planning outings (circus,
//! theatre, excursions) with pocket-money wallets.
//!
//! # Architecture
//!
//! - **core**: Calendar days
//! - **models**: Domain types (Child, Event, Group, Agenda, Schedule, State)
//! - **membership**: Joining and leaving the group
//! - **planning**: Agenda and schedule placement, quorum promotion
//! - **booking**: Subscriptions, tickets and donations
//! - **report**: Read-only schedule view
//! - **orchestrator**: Scenario configuration and replay
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 and wallets never go negative
//! 2. An event is on at most one agenda or schedule, never both
//! 3. A child belongs to at most one group
//! 4. Every operation is logged, rejected ones included

// Module declarations
pub mod booking;
pub mod core;
pub mod membership;
pub mod models;
pub mod orchestrator;
pub mod planning;
pub mod report;

// Re-exports for convenience
pub use crate::core::calendar::{CalendarError, Day, DAYS_IN_MONTH};
pub use booking::BookingError;
pub use membership::MembershipError;
pub use models::{
    activity::{Activity, ActivityLog},
    agenda::Agenda,
    child::{Child, ChildId, WalletError},
    event::{Event, EventId, EventKind},
    group::{Group, GroupId},
    schedule::Schedule,
    state::{Placement, SimulationState},
};
pub use orchestrator::{
    Action, EventConfig, RejectedAction, RunSummary, Simulation, SimulationConfig,
    SimulationError,
};
pub use planning::{DroppedEvent, PlanningError, Promotion};
pub use report::{DayPlan, EventSummary, ScheduleReport};
