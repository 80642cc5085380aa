// crates/olympus-gates/tests/gates_ice_cin.rs
// ============================================================================
// Module: Intent Collapse/Canonical Intent Normalisation Gate Tests
// Description: Exercises ICE's causal-cone classification and CIN's
// equivalence-class reduction of aligned intents.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeSet;

use olympus_core::ActionId;
use olympus_core::ActionType;
use olympus_core::AttemptedAction;
use olympus_core::ChangeDirection;
use olympus_core::Fingerprint;
use olympus_core::HandoffId;
use olympus_core::Intervention;
use olympus_core::InterventionType;
use olympus_core::IntentId;
use olympus_core::Mccs;
use olympus_core::NecessaryFuture;
use olympus_core::ShapeId;
use olympus_gates::gates::cin;
use olympus_gates::gates::ice::CausalCone;
use olympus_gates::gates::ice::IncomingIntent;
use olympus_gates::gates::ice::IntentClass;
use olympus_gates::gates::ice::classify;

fn necessary_future(target_shape: &str) -> NecessaryFuture {
    let intervention = Intervention::new(
        ShapeId::new(target_shape),
        HandoffId::H2,
        InterventionType::AttributePreservation,
        "keep the requirement attribute through the design handoff",
        1.0,
    );
    let mccs = Mccs::build(vec![intervention], 1.0, true).expect("builds mccs");
    NecessaryFuture {
        doomed_fingerprint: Fingerprint::from_hex("1111222233334444"),
        mccs,
        entropy_ceiling: 0.2,
        stabilization_step: 3,
        tie_recorded: false,
        required_actions: vec!["notify downstream reviewers".to_string()],
        survivable_steps: 8,
    }
}

fn action(id: &str, action_type: ActionType, shapes: &[&str], handoffs: &[HandoffId]) -> AttemptedAction {
    AttemptedAction {
        action_id: ActionId::new(id),
        action_type,
        description: String::new(),
        affected_shapes: shapes.iter().map(|s| ShapeId::new(*s)).collect(),
        affected_handoffs: handoffs.iter().copied().collect(),
        transform_types: BTreeSet::new(),
        change_directions: BTreeSet::from([ChangeDirection::Modify]),
    }
}

#[test]
fn ice_aligns_a_read_over_a_preserved_shape() {
    let future = necessary_future("shape-target");
    let preserved = BTreeSet::from([ShapeId::new("shape-kept")]);
    let cone = CausalCone::derive(&future, preserved);

    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-1"),
        action: action("act-1", ActionType::Read, &["shape-kept"], &[]),
    };
    let verdict = classify(&cone, &intent, &[]);
    assert_eq!(verdict.class, IntentClass::Aligned);
    assert!(verdict.rejection_trace.is_none());
}

#[test]
fn ice_aligns_a_restore_transform_over_an_intervention_target() {
    let future = necessary_future("shape-target");
    let cone = CausalCone::derive(&future, BTreeSet::new());

    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-2"),
        action: action("act-2", ActionType::Transform, &["shape-target"], &[]),
    };
    let verdict = classify(&cone, &intent, &[]);
    assert_eq!(verdict.class, IntentClass::Aligned);
}

#[test]
fn ice_rejects_a_delete_as_contradictory() {
    let future = necessary_future("shape-target");
    let cone = CausalCone::derive(&future, BTreeSet::new());

    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-3"),
        action: action("act-3", ActionType::Delete, &["shape-target"], &[]),
    };
    let verdict = classify(&cone, &intent, &[]);
    assert_eq!(verdict.class, IntentClass::Contradictory);
    assert!(verdict.rejection_trace.is_some());
}

#[test]
fn ice_rejects_breaking_a_protected_handoff() {
    let future = necessary_future("shape-target");
    let cone = CausalCone::derive(&future, BTreeSet::new());
    assert!(cone.protected_handoffs.contains(&HandoffId::H2));

    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-4"),
        action: action("act-4", ActionType::Update, &["shape-target"], &[HandoffId::H2]),
    };
    let verdict = classify(&cone, &intent, &[]);
    assert_eq!(verdict.class, IntentClass::Contradictory);
}

#[test]
fn ice_marks_an_unrelated_action_non_causal() {
    let future = necessary_future("shape-target");
    let cone = CausalCone::derive(&future, BTreeSet::new());

    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-5"),
        action: action("act-5", ActionType::Update, &["shape-unrelated"], &[]),
    };
    let verdict = classify(&cone, &intent, &[]);
    assert_eq!(verdict.class, IntentClass::NonCausal);
}

#[test]
fn ice_marks_a_repeated_allowed_action_redundant() {
    let future = necessary_future("shape-target");
    let cone = CausalCone::derive(&future, BTreeSet::new());

    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-6"),
        action: action("act-2", ActionType::Transform, &["shape-target"], &[]),
    };
    let already_allowed = [ActionId::new("act-2")];
    let verdict = classify(&cone, &intent, &already_allowed);
    assert_eq!(verdict.class, IntentClass::Redundant);
}

#[test]
fn cin_reduces_two_structurally_identical_intents_to_one_equivalence_class() {
    let mut index = cin::EquivalenceIndex::new();

    let first = IncomingIntent {
        intent_id: IntentId::new("intent-first"),
        action: action("act-a", ActionType::Update, &["shape-target"], &[]),
    };
    let second = IncomingIntent {
        intent_id: IntentId::new("intent-second"),
        action: action("act-b", ActionType::Update, &["shape-target"], &[]),
    };

    let first_id = index.normalize(&first, IntentClass::Aligned).expect("normalizes").expect("aligned");
    let second_id = index.normalize(&second, IntentClass::Aligned).expect("normalizes").expect("aligned");

    assert_eq!(first_id, IntentId::new("intent-first"));
    assert_eq!(second_id, first_id, "structurally identical intents collapse to the first seen");
}

#[test]
fn cin_ignores_non_aligned_intents() {
    let mut index = cin::EquivalenceIndex::new();
    let intent = IncomingIntent {
        intent_id: IntentId::new("intent-skip"),
        action: action("act-c", ActionType::Update, &["shape-unrelated"], &[]),
    };
    let result = index.normalize(&intent, IntentClass::NonCausal).expect("normalizes");
    assert!(result.is_none());
}

#[test]
fn cin_canonicalize_ignores_operation_narrative() {
    let action_a = action("act-d", ActionType::Update, &["shape-target"], &[]);
    let mut action_b = action_a.clone();
    action_b.action_id = ActionId::new("act-e");

    let canonical_a = cin::canonicalize(&action_a).expect("canonicalizes");
    let canonical_b = cin::canonicalize(&action_b).expect("canonicalizes");
    assert_eq!(canonical_a.canonical_fingerprint, canonical_b.canonical_fingerprint);
}
