// crates/olympus-core/src/core/contract.rs
// ============================================================================
// Module: OLYMPUS Temporal Contract
// Description: Per-project temporal contract and entropy budget.
// Purpose: Model TSL's immutable declarations and consumable budget (§4.12).
// Dependencies: crate::core::{fingerprint, identifiers}, serde
// ============================================================================

//! ## Overview
//! Every project holds exactly one immutable [`TemporalContract`] and one
//! [`EntropyBudget`] (an append-only transaction log). Budget state
//! transitions are fixed thresholds; reaching
//! [`BudgetState::PermanentReadOnly`] is irreversible for all future runs
//! of the project.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ProjectId;

// ============================================================================
// SECTION: Temporal Contract
// ============================================================================

/// A project's immutable temporal contract.
///
/// # Invariants
/// - Exactly one per project; never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalContract {
    /// The project this contract governs.
    pub project_id: ProjectId,
    /// Intended lifespan of the project, in run count.
    pub intended_lifespan: u64,
    /// Maximum number of future mutations the project may undergo.
    pub allowed_future_mutations: u64,
    /// Maximum entropy drift (absolute delta from `baseline_entropy`)
    /// allowed before TSL blocks.
    pub max_entropy_drift: f64,
    /// The entropy value recorded at contract creation time.
    pub baseline_entropy: f64,
}

// ============================================================================
// SECTION: Budget State
// ============================================================================

/// Budget ratio threshold at or above which the budget is
/// [`BudgetState::Active`].
pub const ACTIVE_RATIO: f64 = 0.25;
/// Budget ratio threshold at or above which the budget is
/// [`BudgetState::LowBudget`].
pub const LOW_BUDGET_RATIO: f64 = 0.10;
/// Budget ratio threshold above which the budget is
/// [`BudgetState::Critical`]; at or below it, [`BudgetState::PermanentReadOnly`].
pub const CRITICAL_RATIO: f64 = 0.01;

/// Deterministic classification of an entropy budget's remaining ratio.
///
/// # Invariants
/// - [`BudgetState::PermanentReadOnly`] is irreversible: once a project's
///   budget reaches this state, every future run for that project is
///   blocked regardless of trace content (spec §8 universal property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    /// Remaining ratio `>= ACTIVE_RATIO`.
    Active,
    /// Remaining ratio `>= LOW_BUDGET_RATIO`.
    LowBudget,
    /// Remaining ratio `> CRITICAL_RATIO`.
    Critical,
    /// Remaining ratio `<= CRITICAL_RATIO`. Irreversible.
    PermanentReadOnly,
}

impl BudgetState {
    /// Classifies a remaining-budget ratio into its fixed band.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= ACTIVE_RATIO {
            Self::Active
        } else if ratio >= LOW_BUDGET_RATIO {
            Self::LowBudget
        } else if ratio > CRITICAL_RATIO {
            Self::Critical
        } else {
            Self::PermanentReadOnly
        }
    }
}

// ============================================================================
// SECTION: Entropy Budget
// ============================================================================

/// A project's entropy budget, consumed by each mutation.
///
/// # Invariants
/// - `consumed` never decreases.
/// - Once [`BudgetState::PermanentReadOnly`] is reached, `state` never
///   transitions back to a less severe state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyBudget {
    /// The project this budget belongs to.
    pub project_id: ProjectId,
    /// The total budget allocated at contract creation.
    pub total: f64,
    /// The cumulative amount consumed so far.
    pub consumed: f64,
    /// The current budget state.
    pub state: BudgetState,
}

impl EntropyBudget {
    /// Creates a fresh budget with nothing consumed.
    #[must_use]
    pub fn new(project_id: ProjectId, total: f64) -> Self {
        Self { project_id, total, consumed: 0.0, state: BudgetState::Active }
    }

    /// The remaining-budget ratio, `(total - consumed) / total`.
    #[must_use]
    pub fn remaining_ratio(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        ((self.total - self.consumed) / self.total).max(0.0)
    }

    /// Returns `true` if this budget's state is irreversibly
    /// [`BudgetState::PermanentReadOnly`].
    #[must_use]
    pub const fn is_permanently_read_only(&self) -> bool {
        matches!(self.state, BudgetState::PermanentReadOnly)
    }

    /// Returns `true` if `cost` does not exceed the raw remaining budget.
    /// Distinct from the budget *state*: a cost can be affordable in raw
    /// terms while still driving the state into
    /// [`BudgetState::PermanentReadOnly`] (that transition is recorded by
    /// [`EntropyBudget::consume`], not rejected by this check).
    #[must_use]
    pub fn can_afford(&self, cost: f64) -> bool {
        if self.is_permanently_read_only() {
            return false;
        }
        self.consumed + cost <= self.total
    }

    /// Consumes `cost` from the budget, returning the updated budget.
    /// Once [`BudgetState::PermanentReadOnly`] is reached it is sticky:
    /// further consumption cannot move the state back.
    #[must_use]
    pub fn consume(&self, cost: f64) -> Self {
        if self.is_permanently_read_only() {
            return self.clone();
        }
        let consumed = self.consumed + cost;
        let ratio = if self.total <= 0.0 { 0.0 } else { ((self.total - consumed) / self.total).max(0.0) };
        let state = BudgetState::from_ratio(ratio);
        Self { project_id: self.project_id.clone(), total: self.total, consumed, state }
    }
}
