//! Simulation engine
//!
//! Builds a [`SimulationState`] from a [`SimulationConfig`] and replays
//! its action script. Setup mirrors what a group leader does by hand:
//!
//! 1. Create the group and let every child join
//! 2. Write every proposed event to the agenda
//! 3. Hand out the starting pocket money
//!
//! Then each scripted action is applied in order. A rejected action is
//! recorded in the [`RunSummary`] and the run carries on: nothing in the
//! simulation is fatal.

use crate::booking::{self, BookingError};
use crate::core::calendar::CalendarError;
use crate::membership::{self, MembershipError};
use crate::models::child::{Child, ChildId};
use crate::models::event::EventId;
use crate::models::group::{Group, GroupId};
use crate::models::state::SimulationState;
use crate::orchestrator::config::{Action, SimulationConfig};
use crate::planning::{self, PlanningError};
use crate::report::{self, ScheduleReport};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No child named '{0}'")]
    UnknownChildName(String),

    #[error("No event titled '{0}'")]
    UnknownEventTitle(String),

    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error(transparent)]
    Planning(#[from] PlanningError),

    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// Scripted action that was refused
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedAction {
    pub action: Action,
    pub reason: String,
}

/// Outcome of replaying a script
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of actions that took effect
    pub applied: usize,

    /// Refused actions, in script order
    pub rejected: Vec<RejectedAction>,

    /// Events promoted to the schedule during the run, by title
    pub promoted: Vec<String>,
}

/// A group simulation driven by a scenario
///
/// # Example
/// ```
/// use group_outings_core::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig::from_json(r#"{
///     "starting_wallet": 100,
///     "children": ["Bob", "Nick", "Sam"],
///     "events": [{"title": "Aladdin", "cost": 100, "date": 10,
///                 "kind": "theatre", "genre": "fairytale"}],
///     "actions": [
///         {"action": "subscribe", "child": "Bob", "event": "Aladdin"},
///         {"action": "subscribe", "child": "Nick", "event": "Aladdin"},
///         {"action": "buy", "child": "Sam", "event": "Aladdin"}
///     ]
/// }"#).unwrap();
///
/// let mut sim = Simulation::new(config).unwrap();
/// let summary = sim.run();
///
/// assert_eq!(summary.applied, 3);
/// assert_eq!(summary.promoted, vec!["Aladdin".to_string()]);
/// assert_eq!(sim.report().unwrap().num_events(), 1);
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    state: SimulationState,
    group: GroupId,
}

impl Simulation {
    /// Create a new simulation from a validated configuration
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut state = SimulationState::new();
        let group = state.add_group(Group::new(config.group_name.clone()));

        let mut children = Vec::with_capacity(config.children.len());
        for name in &config.children {
            let child = state.add_child(Child::new(name.clone()));
            membership::join(&mut state, group, child)?;
            children.push(child);
        }

        for event_config in &config.events {
            let event = state.add_event(event_config.build()?);
            planning::write_agenda(&mut state, group, event)?;
        }

        if config.starting_wallet > 0 {
            for child in children {
                booking::donate(&mut state, child, config.starting_wallet)?;
            }
        }

        info!(
            group = %config.group_name,
            children = config.children.len(),
            events = config.events.len(),
            starting_wallet = config.starting_wallet,
            "simulation initialised"
        );

        Ok(Self {
            config,
            state,
            group,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// The simulated group
    pub fn group_id(&self) -> GroupId {
        self.group
    }

    pub fn child_id(&self, name: &str) -> Result<ChildId, SimulationError> {
        self.state
            .find_child(name)
            .ok_or_else(|| SimulationError::UnknownChildName(name.to_string()))
    }

    pub fn event_id(&self, title: &str) -> Result<EventId, SimulationError> {
        self.state
            .find_event(title)
            .ok_or_else(|| SimulationError::UnknownEventTitle(title.to_string()))
    }

    /// Apply one action
    ///
    /// Returns the title of the event promoted by this action, if any.
    pub fn apply(&mut self, action: &Action) -> Result<Option<String>, SimulationError> {
        match action {
            Action::Join { child } => {
                let child = self.child_id(child)?;
                membership::join(&mut self.state, self.group, child)?;
            }
            Action::Leave { child } => {
                let child = self.child_id(child)?;
                membership::leave(&mut self.state, self.group, child)?;
            }
            Action::Subscribe { child, event } => {
                let (child, event) = (self.child_id(child)?, self.event_id(event)?);
                if let Some(promotion) = booking::subscribe(&mut self.state, child, event)? {
                    let title = self
                        .state
                        .event(promotion.event)
                        .map(|event| event.title().to_string());
                    return Ok(title);
                }
            }
            Action::Unsubscribe { child, event } => {
                let (child, event) = (self.child_id(child)?, self.event_id(event)?);
                booking::unsubscribe(&mut self.state, child, event)?;
            }
            Action::Buy { child, event } => {
                let (child, event) = (self.child_id(child)?, self.event_id(event)?);
                booking::buy(&mut self.state, child, event)?;
            }
            Action::Donate { child, amount } => {
                let child = self.child_id(child)?;
                booking::donate(&mut self.state, child, *amount)?;
            }
            Action::Cancel { event } => {
                let event = self.event_id(event)?;
                planning::cancel_event(&mut self.state, event)?;
            }
        }
        Ok(None)
    }

    /// Replay the configured script
    ///
    /// Rejected actions are collected, never fatal.
    pub fn run(&mut self) -> RunSummary {
        let actions = self.config.actions.clone();
        let mut summary = RunSummary::default();

        for action in actions {
            match self.apply(&action) {
                Ok(promoted) => {
                    summary.applied += 1;
                    summary.promoted.extend(promoted);
                }
                Err(err) => {
                    warn!(action = %action, reason = %err, "action rejected");
                    summary.rejected.push(RejectedAction {
                        action,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            applied = summary.applied,
            rejected = summary.rejected.len(),
            promoted = summary.promoted.len(),
            "script finished"
        );
        summary
    }

    /// Schedule report for the group, fingerprinted with the config hash
    pub fn report(&self) -> Result<ScheduleReport, SimulationError> {
        let report = report::show(&self.state, self.group)?;
        Ok(report.with_config_hash(self.config.config_hash()?))
    }
}
