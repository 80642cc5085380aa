// crates/olympus-gates/src/gates/aec.rs
// ============================================================================
// Module: Architectural Entropy Calculator (AEC)
// Description: Second gate; computes this run's entropy score and phase from
// the project's current mortality/singularity/MCCS telemetry.
// Purpose: Translate raw project health signals into a single monotone phase
// that every later gate can react to.
// Dependencies: olympus_core::entropy, olympus_ledger::EntropyLedger
// ============================================================================

//! ## Overview
//! §4.7: reads the most recent persisted [`EntropyState`] (if any) to learn
//! the previous phase, folds this run's four normalized components through
//! [`EntropyComponents::weighted_score`], and persists the resulting state.
//! AEC never computes the raw component values itself — those are supplied
//! by the caller from the Shape Mortality Tracker, the Reality Lock Ledger,
//! and the Optimal Counterfactual Intervention Composer's most recent MCCS —
//! AEC's own job is strictly the fixed-weight fold and the monotonic phase
//! transition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::EntropyComponents;
use olympus_core::EntropyState;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::Phase;
use olympus_ledger::EntropyLedger;

/// Computes and persists this run's entropy state.
///
/// # Errors
/// Returns [`LedgerError`] if the entropy ledger cannot be read or
/// appended.
pub fn evaluate(
    ledger: &mut EntropyLedger,
    components: EntropyComponents,
    mccs_convergence_detected: bool,
) -> Result<EntropyState, LedgerError> {
    let span = tracing::info_span!("aec.evaluate");
    let _guard = span.enter();

    let previous_phase =
        ledger.entries()?.last().map(|entry| entry.payload.phase);
    let state = EntropyState::compute(components, previous_phase, mccs_convergence_detected);

    tracing::info!(entropy = state.value, phase = ?state.phase, "entropy computed");
    ledger.append(state.clone())?;
    Ok(state)
}

/// The pipeline-level action a phase mandates downstream of AEC (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    /// Continue evaluating normally.
    Continue,
    /// OCIC must produce at least one MCCS before ORIS can allow the run.
    MccsMandatory,
    /// Only read-only actions may proceed.
    ReadOnly,
    /// The project is permanently halted; no further actions may proceed.
    PermanentHalt,
}

/// Maps a phase to the action it mandates.
#[must_use]
pub const fn action_for(phase: Phase) -> PhaseAction {
    match phase {
        Phase::Stable => PhaseAction::Continue,
        Phase::Decaying => PhaseAction::MccsMandatory,
        Phase::Collapsing => PhaseAction::ReadOnly,
        Phase::Dead => PhaseAction::PermanentHalt,
    }
}
