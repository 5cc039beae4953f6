//! Orchestrator - scenario configuration and replay
//!
//! See `engine.rs` for the driver and `config.rs` for the scenario format.

pub mod config;
pub mod engine;

// Re-export main types for convenience
pub use config::{Action, EventConfig, SimulationConfig};
pub use engine::{RejectedAction, RunSummary, Simulation, SimulationError};
