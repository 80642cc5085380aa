// crates/olympus-core/tests/contract.rs
// ============================================================================
// Module: Temporal Contract and Budget Tests
// Description: Verifies budget ratio classification and sticky read-only state.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use olympus_core::BudgetState;
use olympus_core::EntropyBudget;
use olympus_core::ProjectId;

#[test]
fn fresh_budget_is_active() {
    let budget = EntropyBudget::new(ProjectId::new("p1"), 100.0);
    assert_eq!(budget.state, BudgetState::Active);
    assert_eq!(budget.remaining_ratio(), 1.0);
}

#[test]
fn budget_state_transitions_through_fixed_bands() {
    let budget = EntropyBudget::new(ProjectId::new("p1"), 100.0);
    let low = budget.consume(76.0);
    assert_eq!(low.state, BudgetState::LowBudget);
    let critical = low.consume(15.0);
    assert_eq!(critical.state, BudgetState::Critical);
    let read_only = critical.consume(8.0);
    assert_eq!(read_only.state, BudgetState::PermanentReadOnly);
}

#[test]
fn permanent_read_only_is_sticky_even_if_more_budget_would_be_freed() {
    let budget = EntropyBudget::new(ProjectId::new("p1"), 100.0);
    let exhausted = budget.consume(100.0);
    assert_eq!(exhausted.state, BudgetState::PermanentReadOnly);
    let still_exhausted = exhausted.consume(0.0);
    assert_eq!(still_exhausted.state, BudgetState::PermanentReadOnly);
    assert_eq!(still_exhausted.consumed, exhausted.consumed);
}

#[test]
fn can_afford_rejects_once_permanently_read_only() {
    let budget = EntropyBudget::new(ProjectId::new("p1"), 100.0).consume(100.0);
    assert!(!budget.can_afford(0.0));
}

#[test]
fn can_afford_checks_raw_remaining_budget() {
    let budget = EntropyBudget::new(ProjectId::new("p1"), 100.0).consume(50.0);
    assert!(budget.can_afford(50.0));
    assert!(!budget.can_afford(50.01));
}
