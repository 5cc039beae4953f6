//! End-to-end scenario replay tests
//!
//! Runs the bundled demo scenario: twelve children with 400 each and nine
//! events. Swan Lake is the only event to reach quorum, which knocks the
//! other day-17 events off the agenda.

use group_outings_core::{
    Action, Activity, Day, Simulation, SimulationConfig, SimulationError,
};

const DEMO: &str = include_str!("../../scenarios/demo.json");

// ============================================================================
// Test Helpers
// ============================================================================

fn demo() -> Simulation {
    let config = SimulationConfig::from_json(DEMO).unwrap();
    Simulation::new(config).unwrap()
}

fn wallet(sim: &Simulation, name: &str) -> i64 {
    let id = sim.child_id(name).unwrap();
    sim.state().child(id).unwrap().wallet()
}

fn small_config(actions: Vec<Action>) -> SimulationConfig {
    SimulationConfig::from_json(
        r#"{
            "group_name": "Tulips",
            "starting_wallet": 200,
            "children": ["Bob", "Nick", "Sam", "Pete", "Pam", "Amy"],
            "events": [
                { "title": "Aladdin", "cost": 100, "date": 10, "kind": "theatre", "genre": "fairytale" }
            ]
        }"#,
    )
    .map(|mut config| {
        config.actions = actions;
        config
    })
    .unwrap()
}

// ============================================================================
// Demo scenario
// ============================================================================

#[test]
fn test_demo_setup() {
    let sim = demo();
    let group = sim.state().group(sim.group_id()).unwrap();

    assert_eq!(group.name(), "Sunflowers");
    assert_eq!(group.count(), 12);
    assert_eq!(group.agenda().len(), 9);
    assert!(group.schedule().is_empty());
    assert_eq!(sim.state().total_wallets(), 12 * 400);
}

#[test]
fn test_demo_run_summary() {
    let mut sim = demo();

    let summary = sim.run();

    assert_eq!(summary.applied, 24);
    assert_eq!(summary.promoted, vec!["Swan Lake".to_string()]);

    let rejected: Vec<(String, &str)> = summary
        .rejected
        .iter()
        .map(|r| (r.action.to_string(), r.reason.as_str()))
        .collect();
    assert_eq!(
        rejected,
        vec![
            (
                "Nick subscribes to 'Cirque de Paris'".to_string(),
                "Insufficient funds: required 200, available 130"
            ),
            (
                "Kyle subscribes to 'Old castles'".to_string(),
                "No event found for 'Old castles'"
            ),
            (
                "Zoey subscribes to 'Old castles'".to_string(),
                "No event found for 'Old castles'"
            ),
        ]
    );
}

#[test]
fn test_demo_final_wallets() {
    let mut sim = demo();
    sim.run();

    let expected = [
        ("Bob", 170),
        ("Nick", 130),
        ("Sam", 115),
        ("Pete", 400),
        ("Pam", 205),
        ("Amy", 310),
        ("Lisa", 170),
        ("Eva", 400),
        ("Lana", 50),
        ("Gabe", 400),
        ("Zoey", 400),
        ("Kyle", 160),
    ];
    for (name, amount) in expected {
        assert_eq!(wallet(&sim, name), amount, "wallet of {}", name);
    }
}

#[test]
fn test_demo_agenda_and_schedule() {
    let mut sim = demo();
    sim.run();

    let state = sim.state();
    let group = state.group(sim.group_id()).unwrap();
    let swan_lake = sim.event_id("Swan Lake").unwrap();

    assert_eq!(group.schedule().events(), &[swan_lake]);
    let pending: Vec<&str> = group
        .agenda()
        .events()
        .iter()
        .map(|id| state.event(*id).unwrap().title())
        .collect();
    assert_eq!(
        pending,
        vec![
            "Bears on bicycles",
            "The 3 bears",
            "The catacombs",
            "Clown Land",
            "Aladdin",
            "The national park",
        ]
    );

    // Four of twelve is exactly a third, not enough
    for title in ["The 3 bears", "Clown Land"] {
        let id = sim.event_id(title).unwrap();
        assert_eq!(state.event(id).unwrap().attendee_count(), 4);
    }

    assert_eq!(state.log().of_type("Promoted").len(), 1);
    let dropped: Vec<&str> = state
        .log()
        .of_type("ConflictDropped")
        .iter()
        .filter_map(|activity| activity.event_id())
        .map(|id| state.event(id).unwrap().title())
        .collect();
    assert_eq!(dropped, vec!["Cirque de Paris", "Old castles"]);
}

#[test]
fn test_demo_report() {
    let mut sim = demo();
    sim.run();

    let report = sim.report().unwrap();

    assert_eq!(report.group, "Sunflowers");
    assert_eq!(report.num_events(), 1);
    let plan = report.day(Day::new(17).unwrap()).unwrap();
    assert_eq!(plan.events[0].title, "Swan Lake");
    assert_eq!(plan.events[0].kind, "theatre");
    assert_eq!(
        plan.events[0].attendees,
        vec!["Sam", "Pam", "Lisa", "Lana", "Kyle"]
    );
    assert_eq!(
        report.config_hash.as_deref(),
        Some(sim.config().config_hash().unwrap().as_str())
    );

    let text = report.to_string();
    assert!(text.contains("Day: 17\nSwan Lake (theatre)\nballet\nCost: 150\nClassic by Tchaikovsky\n"));
    assert!(text.contains("Attendees: Sam Pam Lisa Lana Kyle\n"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["days"][0]["day"], 17);
    assert_eq!(json["days"][0]["events"][0]["cost"], 150);
}

#[test]
fn test_demo_is_deterministic() {
    let mut first = demo();
    let mut second = demo();
    first.run();
    second.run();

    assert_eq!(first.report().unwrap(), second.report().unwrap());
}

#[test]
fn test_poorer_group_gets_a_different_outcome() {
    let mut config = SimulationConfig::from_json(DEMO).unwrap();
    config.starting_wallet = 300;
    let hash_400 = SimulationConfig::from_json(DEMO).unwrap().config_hash().unwrap();
    assert_ne!(config.config_hash().unwrap(), hash_400);

    let mut sim = Simulation::new(config).unwrap();
    let summary = sim.run();

    // Lana cannot afford Swan Lake after two other outings
    assert!(summary
        .rejected
        .iter()
        .any(|r| r.action.to_string() == "Lana subscribes to 'Swan Lake'"));
    for child in sim.state().children() {
        assert!(child.wallet() >= 0);
    }
}

// ============================================================================
// Scripted actions
// ============================================================================

#[test]
fn test_cancel_action_refunds() {
    let mut sim = Simulation::new(small_config(vec![
        Action::Subscribe {
            child: "Bob".to_string(),
            event: "Aladdin".to_string(),
        },
        Action::Cancel {
            event: "Aladdin".to_string(),
        },
        Action::Subscribe {
            child: "Nick".to_string(),
            event: "Aladdin".to_string(),
        },
    ]))
    .unwrap();

    let summary = sim.run();

    assert_eq!(summary.applied, 2);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(wallet(&sim, "Bob"), 200);
    assert_eq!(wallet(&sim, "Nick"), 200);
    assert!(sim
        .state()
        .log()
        .entries()
        .iter()
        .any(|a| matches!(a, Activity::Cancelled { amount: 100, .. })));
}

#[test]
fn test_leave_donate_and_buy_actions() {
    let mut sim = Simulation::new(small_config(vec![
        Action::Subscribe {
            child: "Bob".to_string(),
            event: "Aladdin".to_string(),
        },
        Action::Subscribe {
            child: "Nick".to_string(),
            event: "Aladdin".to_string(),
        },
        Action::Leave {
            child: "Amy".to_string(),
        },
        Action::Subscribe {
            child: "Sam".to_string(),
            event: "Aladdin".to_string(),
        },
        Action::Donate {
            child: "Pete".to_string(),
            amount: 50,
        },
        Action::Buy {
            child: "Pete".to_string(),
            event: "Aladdin".to_string(),
        },
        Action::Buy {
            child: "Amy".to_string(),
            event: "Aladdin".to_string(),
        },
    ]))
    .unwrap();

    let summary = sim.run();

    // 3 of 5 remaining members promotes Aladdin
    assert_eq!(summary.promoted, vec!["Aladdin".to_string()]);
    assert_eq!(summary.applied, 6);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].reason, "Amy is not in a group");
    assert_eq!(wallet(&sim, "Pete"), 150);
}

#[test]
fn test_huge_donation_is_rejected_not_fatal() {
    let mut sim = Simulation::new(small_config(vec![
        Action::Donate {
            child: "Bob".to_string(),
            amount: i64::MAX,
        },
        Action::Donate {
            child: "Bob".to_string(),
            amount: 5,
        },
    ]))
    .unwrap();

    let summary = sim.run();

    assert_eq!(summary.applied, 1);
    assert_eq!(summary.rejected.len(), 1);
    assert!(summary.rejected[0].reason.contains("overflow"));
    assert_eq!(wallet(&sim, "Bob"), 205);
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_malformed_json() {
    assert!(matches!(
        SimulationConfig::from_json("{ not json"),
        Err(SimulationError::Json(_))
    ));
}

#[test]
fn test_invalid_configs() {
    let mut config = small_config(Vec::new());
    config.starting_wallet = -1;
    assert!(matches!(
        Simulation::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));

    let mut config = small_config(Vec::new());
    config.children.push("Bob".to_string());
    assert!(matches!(
        Simulation::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));

    let mut config = small_config(Vec::new());
    config.events[0].date = 32;
    assert!(matches!(
        Simulation::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_action_naming_unknown_child() {
    let config = small_config(vec![Action::Subscribe {
        child: "Zoey".to_string(),
        event: "Aladdin".to_string(),
    }]);

    match Simulation::new(config) {
        Err(SimulationError::UnknownChildName(name)) => assert_eq!(name, "Zoey"),
        other => panic!("expected UnknownChildName, got {:?}", other.map(|_| ())),
    }
}
