// crates/olympus-core/tests/action_and_causal.rs
// ============================================================================
// Module: Action Signature and Causal Fingerprint Tests
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
use olympus_core::ActionSignature;
use olympus_core::ActionType;
use olympus_core::AgentId;
use olympus_core::AttemptedAction;
use olympus_core::CausalFingerprintRecord;
use olympus_core::ChangeDirection;
use olympus_core::HandoffDiff;
use olympus_core::HandoffId;
use olympus_core::ShapeId;

fn sample_action(description: &str) -> AttemptedAction {
    let mut affected_shapes = BTreeSet::new();
    affected_shapes.insert(ShapeId::new("s1"));
    let mut affected_handoffs = BTreeSet::new();
    affected_handoffs.insert(HandoffId::H1);
    let mut transform_types = BTreeSet::new();
    transform_types.insert("rewrite".to_string());
    let mut change_directions = BTreeSet::new();
    change_directions.insert(ChangeDirection::Modify);
    AttemptedAction {
        action_id: ActionId::new("a1"),
        action_type: ActionType::Transform,
        description: description.to_string(),
        affected_shapes,
        affected_handoffs,
        transform_types,
        change_directions,
    }
}

#[test]
fn action_signature_ignores_description_and_id() {
    let a = sample_action("first description");
    let b = sample_action("a completely different description");
    let sig_a = ActionSignature::compute(&a).expect("computes");
    let sig_b = ActionSignature::compute(&b).expect("computes");
    assert_eq!(sig_a.fingerprint, sig_b.fingerprint);
}

#[test]
fn action_signature_changes_with_affected_shapes() {
    let mut a = sample_action("x");
    let b = sample_action("x");
    a.affected_shapes.insert(ShapeId::new("s2"));
    let sig_a = ActionSignature::compute(&a).expect("computes");
    let sig_b = ActionSignature::compute(&b).expect("computes");
    assert_ne!(sig_a.fingerprint, sig_b.fingerprint);
}

fn sample_diff(lost: bool) -> HandoffDiff {
    let mut before = BTreeSet::new();
    before.insert("attr_a".to_string());
    before.insert("attr_b".to_string());
    let mut after = before.clone();
    let mut lost_set = BTreeSet::new();
    if lost {
        after.remove("attr_b");
        lost_set.insert("attr_b".to_string());
    }
    HandoffDiff {
        handoff: HandoffId::H2,
        loss_detected: lost,
        loss_class: None,
        attributes_before: before,
        attributes_after: after,
        attributes_lost: lost_set,
        summarization_invoked: false,
    }
}

#[test]
fn causal_fingerprint_record_never_grants_a_bypass() {
    let record = CausalFingerprintRecord::build(
        HandoffId::H2,
        AgentId::new("agent-a"),
        AgentId::new("agent-b"),
        sample_diff(true),
        true,
    )
    .expect("builds");
    assert!(record.invariant_bypass_requested);
    assert!(!record.invariant_bypass_granted);
}

#[test]
fn causal_fingerprint_record_transform_hash_is_stable_across_agent_identity() {
    let diff = sample_diff(false);
    let with_agents_a = CausalFingerprintRecord::build(
        HandoffId::H2,
        AgentId::new("agent-a"),
        AgentId::new("agent-b"),
        diff.clone(),
        false,
    )
    .expect("builds");
    let with_agents_b = CausalFingerprintRecord::build(
        HandoffId::H2,
        AgentId::new("agent-x"),
        AgentId::new("agent-y"),
        diff,
        false,
    )
    .expect("builds");
    assert_eq!(with_agents_a.transform_hash, with_agents_b.transform_hash);
}
