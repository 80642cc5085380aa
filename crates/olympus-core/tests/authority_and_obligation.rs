// crates/olympus-core/tests/authority_and_obligation.rs
// ============================================================================
// Module: Authority and Obligation Tests
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
use olympus_core::Invariant;
use olympus_core::InvariantCategory;
use olympus_core::InvariantId;
use olympus_core::Obligation;
use olympus_core::ObligationId;
use olympus_core::ObligationPriority;
use olympus_core::ObligationSource;
use olympus_core::ObligationStatus;

fn refutable_invariant(supremacy_level: u8, refutable_by: Vec<AuthorityClass>) -> Invariant {
    Invariant {
        id: InvariantId::new("inv-1"),
        category: InvariantCategory::Structural,
        supremacy_level,
        refutable_by,
        requires_action: None,
    }
}

#[test]
fn authority_levels_are_strictly_ordered() {
    assert!(AuthorityClass::User < AuthorityClass::Project);
    assert!(AuthorityClass::Project < AuthorityClass::Constitutional);
    assert!(AuthorityClass::Constitutional < AuthorityClass::SystemRoot);
    assert_eq!(AuthorityClass::SystemRoot.level(), 4);
}

#[test]
fn supremacy_level_one_is_unrefutable_by_anyone() {
    let invariant = refutable_invariant(1, vec![AuthorityClass::SystemRoot]);
    assert!(!invariant
        .refutable_by_authority(AuthorityClass::SystemRoot, AuthorityClass::SystemRoot));
}

#[test]
fn refutation_requires_membership_in_refutable_by() {
    let invariant = refutable_invariant(2, vec![AuthorityClass::Constitutional]);
    assert!(!invariant.refutable_by_authority(AuthorityClass::Project, AuthorityClass::User));
    assert!(invariant
        .refutable_by_authority(AuthorityClass::Constitutional, AuthorityClass::User));
}

#[test]
fn refutation_requires_refuter_level_at_least_refuted_level() {
    let invariant = refutable_invariant(2, vec![AuthorityClass::Project]);
    assert!(!invariant
        .refutable_by_authority(AuthorityClass::Project, AuthorityClass::Constitutional));
}

fn sample_obligation(priority: ObligationPriority, status: ObligationStatus) -> Obligation {
    Obligation {
        id: ObligationId::new("ob-1"),
        deadline_step: 10,
        required_authority_class: AuthorityClass::Project,
        priority,
        protected_invariant: None,
        source: ObligationSource::NecessaryFuture,
        status,
    }
}

#[test]
fn obligation_is_violated_the_step_after_its_deadline() {
    let obligation = sample_obligation(ObligationPriority::Critical, ObligationStatus::Pending);
    assert_eq!(obligation.advance(10).status, ObligationStatus::Pending);
    assert_eq!(obligation.advance(11).status, ObligationStatus::Violated);
}

#[test]
fn fulfilled_obligation_never_reverts_to_violated() {
    let obligation = sample_obligation(ObligationPriority::Critical, ObligationStatus::Fulfilled);
    assert_eq!(obligation.advance(999).status, ObligationStatus::Fulfilled);
}

#[test]
fn violated_obligation_cannot_be_fulfilled() {
    let obligation = sample_obligation(ObligationPriority::Critical, ObligationStatus::Violated);
    assert_eq!(obligation.fulfill().status, ObligationStatus::Violated);
}

#[test]
fn only_critical_obligations_block_progress() {
    let low = sample_obligation(ObligationPriority::Low, ObligationStatus::Violated);
    assert!(!low.blocks_progress(11));
    let critical_violated = sample_obligation(ObligationPriority::Critical, ObligationStatus::Violated);
    assert!(critical_violated.blocks_progress(11));
    let critical_pending_past_deadline =
        sample_obligation(ObligationPriority::Critical, ObligationStatus::Pending);
    assert!(critical_pending_past_deadline.blocks_progress(11));
    assert!(!critical_pending_past_deadline.blocks_progress(10));
}
