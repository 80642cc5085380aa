// crates/olympus-gates/tests/gates_odl.rs
// ============================================================================
// Module: Obligation Detection Gate Tests
// Description: Exercises ODL's three derivation sources and its window
// tracker's progress-blocking rule.
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
use olympus_core::Fingerprint;
use olympus_core::HandoffId;
use olympus_core::Intervention;
use olympus_core::InterventionType;
use olympus_core::Invariant;
use olympus_core::InvariantCategory;
use olympus_core::InvariantId;
use olympus_core::LedgerBackend;
use olympus_core::Mccs;
use olympus_core::NecessaryFuture;
use olympus_core::ObligationPriority;
use olympus_core::ObligationSource;
use olympus_core::ObligationStatus;
use olympus_core::ProjectId;
use olympus_core::ShapeId;
use olympus_core::TemporalContract;
use olympus_gates::gates::odl;
use olympus_ledger::ObligationLedger;

fn future(survivable_steps: u64, required_actions: Vec<String>) -> NecessaryFuture {
    let intervention = Intervention::new(
        ShapeId::new("shape-target"),
        HandoffId::H2,
        InterventionType::AttributePreservation,
        "restore the dropped attribute",
        0.5,
    );
    let mccs = Mccs::build(vec![intervention], 0.5, true).expect("builds mccs");
    NecessaryFuture {
        doomed_fingerprint: Fingerprint::from_hex("9988776655443322"),
        mccs,
        entropy_ceiling: 0.2,
        stabilization_step: 2,
        tie_recorded: false,
        required_actions,
        survivable_steps,
    }
}

#[test]
fn derive_from_future_emits_one_obligation_per_required_action() {
    let necessary_future = future(10, vec!["notify downstream reviewers".to_string(), "archive trace".to_string()]);
    let obligations = odl::derive_from_future(&necessary_future, 5, "run-1");
    assert_eq!(obligations.len(), 2);
    assert!(obligations.iter().all(|o| matches!(o.source, ObligationSource::NecessaryFuture)));
    assert!(obligations.iter().all(|o| o.deadline_step == 6));
}

#[test]
fn derive_from_future_adds_an_implicit_survivability_obligation_when_short() {
    let necessary_future = future(2, Vec::new());
    let obligations = odl::derive_from_future(&necessary_future, 5, "run-2");
    assert_eq!(obligations.len(), 1);
    assert!(matches!(obligations[0].source, ObligationSource::SurvivabilityAction));
    assert_eq!(obligations[0].deadline_step, 6);
}

#[test]
fn derive_from_future_skips_survivability_obligation_when_comfortably_survivable() {
    let necessary_future = future(10, Vec::new());
    let obligations = odl::derive_from_future(&necessary_future, 5, "run-3");
    assert!(obligations.is_empty());
}

fn contract() -> TemporalContract {
    TemporalContract {
        project_id: ProjectId::new("project-1"),
        intended_lifespan: 100,
        allowed_future_mutations: 100,
        max_entropy_drift: 0.5,
        baseline_entropy: 0.2,
    }
}

#[test]
fn derive_from_contract_warns_once_lifespan_enters_its_warning_range() {
    let project_contract = contract();
    let obligations = odl::derive_from_contract(&project_contract, 95, 0, 0.2, 10, "run-4");
    assert_eq!(obligations.len(), 1);
    assert!(matches!(obligations[0].source, ObligationSource::TemporalContract));
    assert!(matches!(obligations[0].priority, ObligationPriority::Medium));
}

#[test]
fn derive_from_contract_warns_on_every_bound_simultaneously_entering_range() {
    let project_contract = contract();
    let obligations = odl::derive_from_contract(&project_contract, 95, 95, 0.69, 10, "run-5");
    assert_eq!(obligations.len(), 3);
}

#[test]
fn derive_from_contract_is_silent_when_every_bound_has_healthy_headroom() {
    let project_contract = contract();
    let obligations = odl::derive_from_contract(&project_contract, 10, 10, 0.2, 10, "run-6");
    assert!(obligations.is_empty());
}

#[test]
fn derive_from_invariant_is_none_without_a_requires_action() {
    let passive = Invariant {
        id: InvariantId::new("inv-passive"),
        category: InvariantCategory::Structural,
        supremacy_level: 5,
        refutable_by: vec![AuthorityClass::Constitutional],
        requires_action: None,
    };
    assert!(odl::derive_from_invariant(&passive, 3, 2, "run-7").is_none());
}

#[test]
fn derive_from_invariant_produces_a_critical_obligation_protecting_it() {
    let active = Invariant {
        id: InvariantId::new("inv-active"),
        category: InvariantCategory::Causal,
        supremacy_level: 5,
        refutable_by: vec![AuthorityClass::Constitutional],
        requires_action: Some("file an incident report".to_string()),
    };
    let obligation = odl::derive_from_invariant(&active, 3, 2, "run-8").expect("derives");
    assert!(matches!(obligation.priority, ObligationPriority::Critical));
    assert!(matches!(obligation.source, ObligationSource::Invariant));
    assert_eq!(obligation.protected_invariant, Some(InvariantId::new("inv-active")));
    assert_eq!(obligation.deadline_step, 5);
}

#[test]
fn evaluate_does_not_block_while_a_critical_obligation_is_still_within_its_window() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut ledger = ObligationLedger::open(dir.path().join("obligations.jsonl")).expect("opens");
    let necessary_future = future(2, vec!["notify downstream reviewers".to_string()]);
    let obligations = odl::derive_from_future(&necessary_future, 1, "run-9");

    let outcome = odl::evaluate(&mut ledger, &obligations, 1).expect("evaluates");
    assert!(!outcome.blocks_progress);
    assert!(!outcome.omission_detected);
    assert!(outcome.advanced.iter().all(|o| matches!(o.status, ObligationStatus::Pending)));
}

#[test]
fn evaluate_blocks_and_reports_omission_once_a_critical_deadline_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut ledger = ObligationLedger::open(dir.path().join("obligations.jsonl")).expect("opens");
    let necessary_future = future(2, vec!["notify downstream reviewers".to_string()]);
    let obligations = odl::derive_from_future(&necessary_future, 1, "run-10");

    let outcome = odl::evaluate(&mut ledger, &obligations, 100).expect("evaluates");
    assert!(outcome.blocks_progress);
    assert!(outcome.omission_detected);
    assert!(outcome.advanced.iter().any(|o| matches!(o.status, ObligationStatus::Violated)));
    assert_eq!(ledger.len(), obligations.len() as u64);
}

#[test]
fn evaluate_never_blocks_on_a_medium_priority_obligation_past_its_deadline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut ledger = ObligationLedger::open(dir.path().join("obligations.jsonl")).expect("opens");
    let project_contract = contract();
    let obligations = odl::derive_from_contract(&project_contract, 95, 0, 0.2, 1, "run-11");

    let outcome = odl::evaluate(&mut ledger, &obligations, 100).expect("evaluates");
    assert!(!outcome.blocks_progress, "a Medium obligation is recorded as violated but never blocks progress");
    assert!(outcome.advanced.iter().any(|o| matches!(o.status, ObligationStatus::Violated)));
}
