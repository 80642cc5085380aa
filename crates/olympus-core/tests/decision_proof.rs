// crates/olympus-core/tests/decision_proof.rs
// ============================================================================
// Module: Decision Proof Tests
// Description: Verifies proof hash coverage, continuity hashing, and abort
// reason synthesis.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use olympus_core::AuthorityClass;
use olympus_core::CausalChainStep;
use olympus_core::Decision;
use olympus_core::EntropyComponents;
use olympus_core::EntropyState;
use olympus_core::Fingerprint;
use olympus_core::LedgerIndex;
use olympus_core::OlympusDecisionProof;
use olympus_core::ProofInputs;
use olympus_core::RunId;
use olympus_core::TemporalContractSummary;

fn base_inputs(decision: Decision) -> ProofInputs {
    ProofInputs {
        run_id: RunId::new("run-1"),
        action_fingerprint: Fingerprint::from_hex("aaaaaaaaaaaaaaaa"),
        final_decision: decision,
        primary_invariant_violated: None,
        causal_chain: vec![CausalChainStep::new("ie", "inevitability proven")],
        forbidden_alternatives: Vec::new(),
        necessary_future_summary: None,
        entropy_state: EntropyState::compute(
            EntropyComponents::new(0.0, 0.0, 0.0, 0.0),
            None,
            false,
        ),
        temporal_contract_summary: TemporalContractSummary {
            remaining_budget_ratio: 1.0,
            permanently_read_only: false,
        },
        parent_proof_hashes: Vec::new(),
        refuted_precedents: Vec::new(),
        authority_class: AuthorityClass::Project,
        invariant_supremacy_level: None,
        ledger_index: LedgerIndex::new(0),
        attestation_tip_hash: Fingerprint::from_hex("bbbbbbbbbbbbbbbb"),
    }
}

#[test]
fn proof_hash_changes_when_any_covered_field_changes() {
    let a = OlympusDecisionProof::build(base_inputs(Decision::Allow)).expect("builds");
    let b = OlympusDecisionProof::build(base_inputs(Decision::Block)).expect("builds");
    assert_ne!(a.proof_hash, b.proof_hash);
}

#[test]
fn identical_inputs_produce_identical_proof_hashes() {
    let a = OlympusDecisionProof::build(base_inputs(Decision::Allow)).expect("builds");
    let b = OlympusDecisionProof::build(base_inputs(Decision::Allow)).expect("builds");
    assert_eq!(a.proof_hash, b.proof_hash);
}

#[test]
fn continuity_hash_entangles_attestation_tip() {
    let mut inputs_a = base_inputs(Decision::Allow);
    let mut inputs_b = base_inputs(Decision::Allow);
    inputs_a.attestation_tip_hash = Fingerprint::from_hex("1111111111111111");
    inputs_b.attestation_tip_hash = Fingerprint::from_hex("2222222222222222");
    let a = OlympusDecisionProof::build(inputs_a).expect("builds");
    let b = OlympusDecisionProof::build(inputs_b).expect("builds");
    assert_eq!(a.proof_hash, b.proof_hash);
    assert_ne!(a.continuity_hash, b.continuity_hash);
}

#[test]
fn allow_decision_has_no_abort_reason() {
    let proof = OlympusDecisionProof::build(base_inputs(Decision::Allow)).expect("builds");
    assert!(proof.abort_reason().is_none());
}

#[test]
fn blocking_decision_synthesizes_abort_reason_from_causal_chain() {
    let proof = OlympusDecisionProof::build(base_inputs(Decision::Block)).expect("builds");
    let reason = proof.abort_reason().expect("has a reason");
    assert!(reason.contains("ie"));
    assert!(reason.contains("inevitability proven"));
}
