//! Group membership tests
//!
//! A child belongs to at most one group; joining and leaving keep the
//! group's member list and the child's back-reference in sync.

use group_outings_core::{
    booking, membership, planning, Activity, BookingError, Child, ChildId, Day, Event, Group,
    GroupId, MembershipError, SimulationState,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn day(n: u8) -> Day {
    Day::new(n).unwrap()
}

/// Create a group with `size` members, each holding `wallet`
fn create_group(state: &mut SimulationState, size: usize, wallet: i64) -> (GroupId, Vec<ChildId>) {
    let group = state.add_group(Group::new("Sunflowers"));
    let children = (0..size)
        .map(|i| {
            let child = state.add_child(Child::with_wallet(format!("child_{}", i), wallet));
            membership::join(state, group, child).unwrap();
            child
        })
        .collect();
    (group, children)
}

// ============================================================================
// Join / Leave
// ============================================================================

#[test]
fn test_join_then_leave_round_trip() {
    let mut state = SimulationState::new();
    let group = state.add_group(Group::new("Sunflowers"));
    let bob = state.add_child(Child::new("Bob"));

    membership::join(&mut state, group, bob).unwrap();
    assert_eq!(state.child(bob).unwrap().group(), Some(group));
    assert!(state.group(group).unwrap().is_member(bob));
    assert_eq!(state.group(group).unwrap().count(), 1);

    membership::leave(&mut state, group, bob).unwrap();
    assert_eq!(state.child(bob).unwrap().group(), None);
    assert!(!state.group(group).unwrap().is_member(bob));
    assert_eq!(state.group(group).unwrap().count(), 0);

    let types: Vec<_> = state.log().entries().iter().map(|a| a.activity_type()).collect();
    assert_eq!(types, vec!["Joined", "Left"]);
}

#[test]
fn test_join_twice_is_rejected() {
    let mut state = SimulationState::new();
    let group = state.add_group(Group::new("Sunflowers"));
    let bob = state.add_child(Child::new("Bob"));
    membership::join(&mut state, group, bob).unwrap();

    let result = membership::join(&mut state, group, bob);

    assert_eq!(
        result,
        Err(MembershipError::AlreadyMember {
            name: "Bob".to_string()
        })
    );
    assert_eq!(state.group(group).unwrap().count(), 1);
    assert_eq!(
        state.log().last(),
        Some(&Activity::Rejected {
            operation: "join",
            reason: "Bob is already in the group".to_string(),
        })
    );
}

#[test]
fn test_join_second_group_is_rejected() {
    let mut state = SimulationState::new();
    let first = state.add_group(Group::new("Sunflowers"));
    let second = state.add_group(Group::new("Tulips"));
    let nick = state.add_child(Child::new("Nick"));
    membership::join(&mut state, first, nick).unwrap();

    let result = membership::join(&mut state, second, nick);

    assert_eq!(
        result,
        Err(MembershipError::InAnotherGroup {
            name: "Nick".to_string(),
            group: first,
        })
    );
    assert_eq!(state.child(nick).unwrap().group(), Some(first));
    assert_eq!(state.group(second).unwrap().count(), 0);
}

#[test]
fn test_switch_groups_after_leaving() {
    let mut state = SimulationState::new();
    let first = state.add_group(Group::new("Sunflowers"));
    let second = state.add_group(Group::new("Tulips"));
    let sam = state.add_child(Child::new("Sam"));

    membership::join(&mut state, first, sam).unwrap();
    membership::leave(&mut state, first, sam).unwrap();
    membership::join(&mut state, second, sam).unwrap();

    assert_eq!(state.child(sam).unwrap().group(), Some(second));
    assert!(!state.group(first).unwrap().is_member(sam));
}

#[test]
fn test_leave_when_not_member() {
    let mut state = SimulationState::new();
    let group = state.add_group(Group::new("Sunflowers"));
    let pete = state.add_child(Child::new("Pete"));

    assert_eq!(
        membership::leave(&mut state, group, pete),
        Err(MembershipError::NotAMember {
            name: "Pete".to_string()
        })
    );
}

#[test]
fn test_unknown_ids() {
    let mut state = SimulationState::new();
    let group = state.add_group(Group::new("Sunflowers"));
    let ghost_child = ChildId::new();
    let ghost_group = GroupId::new();
    let pam = state.add_child(Child::new("Pam"));

    assert_eq!(
        membership::join(&mut state, group, ghost_child),
        Err(MembershipError::UnknownChild(ghost_child))
    );
    assert_eq!(
        membership::join(&mut state, ghost_group, pam),
        Err(MembershipError::UnknownGroup(ghost_group))
    );
    assert_eq!(state.log().of_type("Rejected").len(), 2);
}

// ============================================================================
// Leaving with bookings
// ============================================================================

#[test]
fn test_leave_refunds_pending_subscriptions_but_keeps_tickets() {
    let mut state = SimulationState::new();
    // 6 members: quorum needs 3 subscribers
    let (group, children) = create_group(&mut state, 6, 300);
    let bob = children[0];

    let aladdin = state.add_event(Event::theatre("Aladdin", 100, day(10), "fairytale"));
    planning::write_agenda(&mut state, group, aladdin).unwrap();
    let park = state.add_event(Event::excursion("The national park", 50, day(15), ["park"]));
    planning::write_schedule(&mut state, group, park).unwrap();

    booking::subscribe(&mut state, bob, aladdin).unwrap();
    booking::buy(&mut state, bob, park).unwrap();
    assert_eq!(state.child(bob).unwrap().wallet(), 150);

    let refunded = membership::leave(&mut state, group, bob).unwrap();

    assert_eq!(refunded, 100);
    assert_eq!(state.child(bob).unwrap().wallet(), 250);
    assert!(!state.event(aladdin).unwrap().is_attending(bob));
    assert!(state.event(park).unwrap().is_attending(bob));
    assert_eq!(
        state.log().last(),
        Some(&Activity::Left {
            group,
            child: bob,
            refunded: 100
        })
    );
}

#[test]
fn test_former_member_cannot_book() {
    let mut state = SimulationState::new();
    let (group, children) = create_group(&mut state, 3, 300);
    let amy = children[1];
    let aladdin = state.add_event(Event::theatre("Aladdin", 100, day(10), "fairytale"));
    planning::write_agenda(&mut state, group, aladdin).unwrap();

    membership::leave(&mut state, group, amy).unwrap();

    assert_eq!(
        booking::subscribe(&mut state, amy, aladdin),
        Err(BookingError::NotAMember {
            name: "child_1".to_string()
        })
    );
    assert_eq!(state.child(amy).unwrap().wallet(), 300);
}
