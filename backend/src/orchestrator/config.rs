//! Scenario configuration
//!
//! A scenario describes a whole simulation declaratively: the group, its
//! children, the events proposed on its agenda, the pocket money every
//! child starts with, and a script of actions to replay. Scenarios are
//! plain JSON:
//!
//! ```json
//! {
//!   "group_name": "Sunflowers",
//!   "starting_wallet": 400,
//!   "children": ["Bob", "Nick"],
//!   "events": [
//!     { "title": "Aladdin", "cost": 100, "date": 10, "kind": "theatre", "genre": "fairytale" }
//!   ],
//!   "actions": [
//!     { "action": "subscribe", "child": "Bob", "event": "Aladdin" }
//!   ]
//! }
//! ```

use crate::core::calendar::Day;
use crate::models::event::{Event, EventKind};
use crate::orchestrator::engine::SimulationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

fn default_group_name() -> String {
    "Group".to_string()
}

/// Complete scenario configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_group_name")]
    pub group_name: String,

    /// Pocket money donated to every child before the script runs
    #[serde(default)]
    pub starting_wallet: i64,

    /// Child names, unique; every child joins the group
    pub children: Vec<String>,

    /// Events written to the agenda in order
    #[serde(default)]
    pub events: Vec<EventConfig>,

    /// Script replayed by `Simulation::run`
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Event as written in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub title: String,
    pub cost: i64,
    pub date: u8,

    #[serde(flatten)]
    pub kind: EventKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventConfig {
    /// Build the event; the config must have been validated
    pub fn build(&self) -> Result<Event, SimulationError> {
        if self.cost < 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "event '{}' has negative cost {}",
                self.title, self.cost
            )));
        }
        let date = Day::new(self.date)?;
        let event = Event::new(self.title.clone(), self.cost, date, self.kind.clone());
        Ok(match &self.description {
            Some(description) => event.with_description(description.clone()),
            None => event,
        })
    }
}

/// One scripted step, naming children and events by name and title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Join { child: String },
    Leave { child: String },
    Subscribe { child: String, event: String },
    Unsubscribe { child: String, event: String },
    Buy { child: String, event: String },
    Donate { child: String, amount: i64 },
    Cancel { event: String },
}

impl Action {
    /// Child named by this action, if any
    pub fn child(&self) -> Option<&str> {
        match self {
            Action::Join { child }
            | Action::Leave { child }
            | Action::Subscribe { child, .. }
            | Action::Unsubscribe { child, .. }
            | Action::Buy { child, .. }
            | Action::Donate { child, .. } => Some(child.as_str()),
            Action::Cancel { .. } => None,
        }
    }

    /// Event named by this action, if any
    pub fn event(&self) -> Option<&str> {
        match self {
            Action::Subscribe { event, .. }
            | Action::Unsubscribe { event, .. }
            | Action::Buy { event, .. }
            | Action::Cancel { event } => Some(event.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Join { child } => write!(f, "{} joins", child),
            Action::Leave { child } => write!(f, "{} leaves", child),
            Action::Subscribe { child, event } => write!(f, "{} subscribes to '{}'", child, event),
            Action::Unsubscribe { child, event } => {
                write!(f, "{} unsubscribes from '{}'", child, event)
            }
            Action::Buy { child, event } => write!(f, "{} buys a ticket to '{}'", child, event),
            Action::Donate { child, amount } => write!(f, "{} receives {}", child, amount),
            Action::Cancel { event } => write!(f, "'{}' is cancelled", event),
        }
    }
}

impl SimulationConfig {
    /// Parse a scenario from JSON
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate configuration
    ///
    /// Checks:
    /// - Group and child names are non-empty, child names unique
    /// - Event titles non-empty and unique, costs non-negative, dates 1-31
    /// - Starting wallet non-negative
    /// - Every action names a known child and event
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.group_name.trim().is_empty() {
            return Err(SimulationError::InvalidConfig(
                "group_name must not be empty".to_string(),
            ));
        }
        if self.starting_wallet < 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "starting_wallet must be non-negative, got {}",
                self.starting_wallet
            )));
        }

        let mut names = HashSet::new();
        for name in &self.children {
            if name.trim().is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "child names must not be empty".to_string(),
                ));
            }
            if !names.insert(name.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate child name '{}'",
                    name
                )));
            }
        }

        let mut titles = HashSet::new();
        for event in &self.events {
            if event.title.trim().is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "event titles must not be empty".to_string(),
                ));
            }
            if !titles.insert(event.title.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate event title '{}'",
                    event.title
                )));
            }
            if event.cost < 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "event '{}' has negative cost {}",
                    event.title, event.cost
                )));
            }
            Day::new(event.date).map_err(|err| {
                SimulationError::InvalidConfig(format!("event '{}': {}", event.title, err))
            })?;
        }

        for action in &self.actions {
            if let Some(child) = action.child() {
                if !names.contains(child) {
                    return Err(SimulationError::UnknownChildName(child.to_string()));
                }
            }
            if let Some(event) = action.event() {
                if !titles.contains(event) {
                    return Err(SimulationError::UnknownEventTitle(event.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Deterministic SHA-256 fingerprint of the configuration
    ///
    /// Object keys are sorted before hashing so the fingerprint depends
    /// only on content.
    pub fn config_hash(&self) -> Result<String, SimulationError> {
        use serde_json::Value;

        fn canonicalize(value: Value) -> Value {
            match value {
                Value::Object(map) => {
                    let mut entries: Vec<(String, Value)> =
                        map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                    entries.sort_by(|a, b| a.0.cmp(&b.0));
                    Value::Object(entries.into_iter().collect())
                }
                Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
                other => other,
            }
        }

        let json = serde_json::to_string(&canonicalize(serde_json::to_value(self)?))?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> SimulationConfig {
        SimulationConfig {
            group_name: "Sunflowers".to_string(),
            starting_wallet: 100,
            children: vec!["Bob".to_string(), "Nick".to_string()],
            events: vec![EventConfig {
                title: "Aladdin".to_string(),
                cost: 100,
                date: 10,
                kind: EventKind::Theatre {
                    genre: "fairytale".to_string(),
                },
                description: None,
            }],
            actions: vec![Action::Subscribe {
                child: "Bob".to_string(),
                event: "Aladdin".to_string(),
            }],
        }
    }

    #[test]
    fn test_minimal_config_is_valid() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_children() {
        let mut config = minimal();
        config.children.push("Bob".to_string());
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_date() {
        let mut config = minimal();
        config.events[0].date = 32;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_names_in_actions() {
        let mut config = minimal();
        config.actions.push(Action::Buy {
            child: "Zoey".to_string(),
            event: "Aladdin".to_string(),
        });
        assert!(matches!(
            config.validate(),
            Err(SimulationError::UnknownChildName(name)) if name == "Zoey"
        ));

        let mut config = minimal();
        config.actions.push(Action::Cancel {
            event: "Swan Lake".to_string(),
        });
        assert!(matches!(
            config.validate(),
            Err(SimulationError::UnknownEventTitle(title)) if title == "Swan Lake"
        ));
    }

    #[test]
    fn test_event_config_parses_kind_inline() {
        let json = r#"{"title": "Clown Land", "cost": 80, "date": 10,
                       "kind": "circus", "tricks": ["by clowns", "by mimes"]}"#;
        let event: EventConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            event.kind,
            EventKind::Circus {
                tricks: vec!["by clowns".to_string(), "by mimes".to_string()]
            }
        );
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_config_hash_is_deterministic() {
        let a = minimal().config_hash().unwrap();
        let b = minimal().config_hash().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut changed = minimal();
        changed.starting_wallet = 500;
        assert_ne!(changed.config_hash().unwrap(), a);
    }
}
