//! Schedule report
//!
//! Read-only view of a group's confirmed calendar: every day with at
//! least one event, in calendar order, with each event's details and the
//! names of its attendees. Serializes to JSON and renders as plain text.

use crate::core::calendar::Day;
use crate::models::event::Event;
use crate::models::group::GroupId;
use crate::models::state::SimulationState;
use crate::planning::PlanningError;
use serde::Serialize;
use std::fmt;

/// One confirmed event as it appears in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub title: String,
    pub kind: &'static str,
    pub details: String,
    pub cost: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attendees: Vec<String>,
}

impl EventSummary {
    fn from_event(event: &Event, state: &SimulationState) -> Self {
        let attendees = event
            .attendees()
            .iter()
            .filter_map(|id| state.child(*id))
            .map(|child| child.name().to_string())
            .collect();

        Self {
            title: event.title().to_string(),
            kind: event.kind().label(),
            details: event.kind().details(),
            cost: event.cost(),
            description: event.description().map(str::to_string),
            attendees,
        }
    }
}

/// All events confirmed for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: Day,
    pub events: Vec<EventSummary>,
}

/// A group's schedule, day by day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub group: String,

    /// Fingerprint of the scenario that produced this schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,

    pub days: Vec<DayPlan>,
}

impl ScheduleReport {
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Total number of confirmed events
    pub fn num_events(&self) -> usize {
        self.days.iter().map(|plan| plan.events.len()).sum()
    }

    /// Find a day's plan
    pub fn day(&self, day: Day) -> Option<&DayPlan> {
        self.days.iter().find(|plan| plan.day == day)
    }
}

/// Build the schedule report for a group
///
/// # Example
/// ```
/// use group_outings_core::{report, Group, SimulationState};
///
/// let mut state = SimulationState::new();
/// let group = state.add_group(Group::new("Sunflowers"));
///
/// let schedule = report::show(&state, group).unwrap();
/// assert_eq!(schedule.num_events(), 0);
/// ```
pub fn show(state: &SimulationState, group_id: GroupId) -> Result<ScheduleReport, PlanningError> {
    let group = state
        .group(group_id)
        .ok_or(PlanningError::UnknownGroup(group_id))?;

    let days = group
        .schedule()
        .booked_days()
        .map(|(day, events)| DayPlan {
            day,
            events: events
                .iter()
                .filter_map(|id| state.event(*id))
                .map(|event| EventSummary::from_event(event, state))
                .collect(),
        })
        .collect();

    Ok(ScheduleReport {
        group: group.name().to_string(),
        config_hash: None,
        days,
    })
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=========GROUP SCHEDULE=========")?;
        for plan in &self.days {
            for event in &plan.events {
                writeln!(f, "Day: {}", plan.day)?;
                writeln!(f, "{} ({})", event.title, event.kind)?;
                if !event.details.is_empty() {
                    writeln!(f, "{}", event.details)?;
                }
                writeln!(f, "Cost: {}", event.cost)?;
                if let Some(description) = &event.description {
                    writeln!(f, "{}", description)?;
                }
                writeln!(f, "Attendees: {}", event.attendees.join(" "))?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_each_event() {
        let report = ScheduleReport {
            group: "Sunflowers".to_string(),
            config_hash: None,
            days: vec![DayPlan {
                day: Day::new(1).unwrap(),
                events: vec![EventSummary {
                    title: "Bears on bicycles".to_string(),
                    kind: "circus",
                    details: "by animals".to_string(),
                    cost: 120,
                    description: Some("Fun show!".to_string()),
                    attendees: vec!["Bob".to_string(), "Lana".to_string()],
                }],
            }],
        };

        let text = report.to_string();
        assert!(text.starts_with("=========GROUP SCHEDULE=========\n"));
        assert!(text.contains("Day: 1\nBears on bicycles (circus)\nby animals\nCost: 120\nFun show!\n"));
        assert!(text.contains("Attendees: Bob Lana\n"));
        assert_eq!(report.num_events(), 1);
    }

    #[test]
    fn test_show_unknown_group() {
        let state = SimulationState::new();
        let group = GroupId::new();
        assert_eq!(show(&state, group), Err(PlanningError::UnknownGroup(group)));
    }
}
