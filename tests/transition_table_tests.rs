//! Exhaustive verification of the legal-transition table.

use prosthesis_core::state_machine::{
    allowed_targets, can_transition, plan_transition, DateEffect, OrderStatus,
};

const ALL: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Sent,
    OrderStatus::Returned,
    OrderStatus::Completed,
    OrderStatus::Canceled,
    OrderStatus::Archived,
];

fn legal_pairs() -> Vec<(OrderStatus, OrderStatus)> {
    vec![
        (OrderStatus::Pending, OrderStatus::Sent),
        (OrderStatus::Pending, OrderStatus::Canceled),
        (OrderStatus::Sent, OrderStatus::Returned),
        (OrderStatus::Sent, OrderStatus::Pending),
        (OrderStatus::Returned, OrderStatus::Completed),
        (OrderStatus::Returned, OrderStatus::Sent),
        (OrderStatus::Completed, OrderStatus::Archived),
        (OrderStatus::Canceled, OrderStatus::Pending),
        (OrderStatus::Archived, OrderStatus::Completed),
    ]
}

#[test]
fn every_pair_matches_the_table() {
    let legal = legal_pairs();
    let mut checked = 0;
    for from in ALL {
        for to in ALL {
            let expected = legal.contains(&(from, to));
            assert_eq!(
                can_transition(from, to),
                expected,
                "can_transition({from}, {to}) should be {expected}"
            );
            assert_eq!(plan_transition(from, to).is_ok(), expected);
            checked += 1;
        }
    }
    assert_eq!(checked, 36);
}

#[test]
fn self_transitions_are_all_rejected() {
    for status in ALL {
        assert!(!can_transition(status, status));
    }
}

#[test]
fn allowed_targets_mirror_can_transition() {
    for from in ALL {
        let targets = allowed_targets(from);
        for to in ALL {
            assert_eq!(targets.contains(&to), can_transition(from, to));
        }
    }
}

#[test]
fn every_status_has_at_least_one_exit() {
    // No dead ends: even archived and canceled can move again
    for from in ALL {
        assert!(!allowed_targets(from).is_empty(), "{from} has no exits");
    }
}

#[test]
fn date_effects_follow_the_shipment_lifecycle() {
    assert_eq!(
        plan_transition(OrderStatus::Pending, OrderStatus::Sent).unwrap(),
        DateEffect::MarkSent
    );
    assert_eq!(
        plan_transition(OrderStatus::Returned, OrderStatus::Sent).unwrap(),
        DateEffect::MarkSent
    );
    assert_eq!(
        plan_transition(OrderStatus::Sent, OrderStatus::Returned).unwrap(),
        DateEffect::MarkReturned
    );
    assert_eq!(
        plan_transition(OrderStatus::Sent, OrderStatus::Pending).unwrap(),
        DateEffect::ClearShipment
    );

    // Everything else is a bare status change
    for (from, to) in [
        (OrderStatus::Pending, OrderStatus::Canceled),
        (OrderStatus::Returned, OrderStatus::Completed),
        (OrderStatus::Completed, OrderStatus::Archived),
        (OrderStatus::Canceled, OrderStatus::Pending),
        (OrderStatus::Archived, OrderStatus::Completed),
    ] {
        assert_eq!(plan_transition(from, to).unwrap(), DateEffect::StatusOnly);
    }
}

#[test]
fn rejection_names_both_states() {
    let err = plan_transition(OrderStatus::Archived, OrderStatus::Sent).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("archived"));
    assert!(message.contains("sent"));
}
