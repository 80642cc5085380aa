// crates/olympus-gates/src/gates/tsl.rs
// ============================================================================
// Module: Temporal Sovereignty (TSL)
// Description: Ninth gate; runs eight fixed-order checks against a
// project's temporal contract and entropy budget.
// Purpose: Enforce the one immutable lifespan/mutation/drift declaration
// every project holds, independent of any single shape's tier compliance.
// Dependencies: olympus_core::contract, olympus_ledger::TslLedger
// ============================================================================

//! ## Overview
//! §4.12: every project holds exactly one immutable [`TemporalContract`]
//! and one [`EntropyBudget`]. TSL evaluates eight checks in the fixed order
//! named in the spec; the first failure blocks with a named reason, and no
//! later check runs once one has failed (checks are not independently
//! informative — a contract that is missing makes every later check
//! meaningless).

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::BudgetState;
use olympus_core::EntropyBudget;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::TemporalContract;
use olympus_ledger::TslLedger;

/// The eight fixed-order checks TSL runs (§4.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TslCheck {
    /// A temporal contract is declared for this project.
    ContractExists,
    /// The project's budget has not already reached `PERMANENT_READ_ONLY`.
    BudgetNotExhausted,
    /// The current action's cost does not exceed the remaining raw budget.
    CanAffordCost,
    /// The project has not exceeded its declared lifespan in run count.
    LifespanNotExceeded,
    /// The project has not exceeded its declared mutation count.
    MutationLimitNotExceeded,
    /// Entropy has not drifted further from baseline than the contract
    /// allows.
    EntropyDriftValid,
    /// A forward simulation of this action does not collapse the project.
    ForwardSimulationPasses,
    /// The impact of any active singularity on this action stays within
    /// bounds the contract tolerates.
    SingularityImpactContained,
}

impl TslCheck {
    /// The fixed evaluation order (§4.12).
    pub const ORDER: [Self; 8] = [
        Self::ContractExists,
        Self::BudgetNotExhausted,
        Self::CanAffordCost,
        Self::LifespanNotExceeded,
        Self::MutationLimitNotExceeded,
        Self::EntropyDriftValid,
        Self::ForwardSimulationPasses,
        Self::SingularityImpactContained,
    ];
}

/// The inputs TSL's eight checks are evaluated against. Each field
/// corresponds to one check in [`TslCheck::ORDER`]; callers compute these
/// from the project's persisted contract/budget and the current run's
/// telemetry.
#[derive(Debug, Clone, Copy)]
pub struct TslInputs<'a> {
    /// The project's declared contract, if one exists.
    pub contract: Option<&'a TemporalContract>,
    /// The project's current entropy budget.
    pub budget: &'a EntropyBudget,
    /// The cost this run's action would consume.
    pub action_cost: f64,
    /// The number of runs this project has completed so far.
    pub runs_completed: u64,
    /// The number of future mutations already committed.
    pub mutations_committed: u64,
    /// This run's current entropy value.
    pub current_entropy: f64,
    /// `true` if a forward simulation of this action stays survivable.
    pub forward_simulation_passes: bool,
    /// `true` if every active singularity's impact on this action stays
    /// within the contract's tolerance.
    pub singularity_impact_contained: bool,
}

/// TSL's verdict: either every check passed, or the first one that failed
/// plus its named reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TslOutcome {
    /// Every check passed; the budget may be consumed.
    Passed,
    /// The named check failed first; no later check ran.
    Blocked {
        /// The check that failed.
        check: TslCheck,
        /// The named reason, matching §6's error identifiers where one
        /// applies.
        block_reason: &'static str,
    },
}

/// Runs the eight fixed-order checks against `inputs`.
#[must_use]
pub fn evaluate(inputs: &TslInputs<'_>) -> TslOutcome {
    let span = tracing::info_span!("tsl.evaluate");
    let _guard = span.enter();

    let Some(contract) = inputs.contract else {
        return TslOutcome::Blocked { check: TslCheck::ContractExists, block_reason: "MISSING_CONTRACT" };
    };

    if inputs.budget.is_permanently_read_only() {
        return TslOutcome::Blocked {
            check: TslCheck::BudgetNotExhausted,
            block_reason: "NO_BUDGET",
        };
    }

    if !inputs.budget.can_afford(inputs.action_cost) {
        return TslOutcome::Blocked {
            check: TslCheck::CanAffordCost,
            block_reason: "INSUFFICIENT_BUDGET",
        };
    }

    if inputs.runs_completed >= contract.intended_lifespan {
        return TslOutcome::Blocked {
            check: TslCheck::LifespanNotExceeded,
            block_reason: "LIFESPAN_EXCEEDED",
        };
    }

    if inputs.mutations_committed >= contract.allowed_future_mutations {
        return TslOutcome::Blocked {
            check: TslCheck::MutationLimitNotExceeded,
            block_reason: "MUTATION_LIMIT_EXCEEDED",
        };
    }

    let drift = (inputs.current_entropy - contract.baseline_entropy).abs();
    if drift > contract.max_entropy_drift {
        return TslOutcome::Blocked {
            check: TslCheck::EntropyDriftValid,
            block_reason: "ENTROPY_DRIFT_EXCEEDED",
        };
    }

    if !inputs.forward_simulation_passes {
        return TslOutcome::Blocked {
            check: TslCheck::ForwardSimulationPasses,
            block_reason: "FUTURE_VIOLATION",
        };
    }

    if !inputs.singularity_impact_contained {
        return TslOutcome::Blocked {
            check: TslCheck::SingularityImpactContained,
            block_reason: "SINGULARITY_BREACH",
        };
    }

    TslOutcome::Passed
}

/// Consumes `action_cost` from the budget and persists the updated state.
/// Callers only reach this after [`evaluate`] returns [`TslOutcome::Passed`].
///
/// # Errors
/// Returns [`LedgerError`] if the append fails.
pub fn consume(
    ledger: &mut TslLedger,
    budget: &EntropyBudget,
    action_cost: f64,
) -> Result<EntropyBudget, LedgerError> {
    let updated = budget.consume(action_cost);
    if matches!(updated.state, BudgetState::PermanentReadOnly) && !budget.is_permanently_read_only() {
        tracing::warn!(project_id = %updated.project_id, "entropy budget reached permanent read-only");
    }
    ledger.append(updated.clone())?;
    Ok(updated)
}
