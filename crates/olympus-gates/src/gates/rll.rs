// crates/olympus-gates/src/gates/rll.rs
// ============================================================================
// Module: Reality Lock Ledger (RLL)
// Description: Third gate; enforces every persisted decision singularity
// against the current attempt's action fingerprint.
// Purpose: Give a once-declared reality lock permanent, unconditional force.
// Dependencies: olympus_core::singularity, olympus_ledger::SingularityLedger
// ============================================================================

//! ## Overview
//! §4.6: a declared [`DecisionSingularity`] is never re-evaluated or
//! softened. RLL's only job is to load every singularity on file and check
//! the attempt's fingerprint against each one's forbidden set, in ledger
//! order, returning the first match (§4.6 "enforcement is absolute").

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::enforce_singularities;
use olympus_core::DecisionSingularity;
use olympus_core::Fingerprint;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::RealityDeviation;
use olympus_ledger::SingularityLedger;

/// Loads every persisted singularity and checks `fingerprint` against each.
///
/// # Errors
/// Returns [`LedgerError`] if the singularity ledger cannot be read.
pub fn evaluate(
    ledger: &SingularityLedger,
    fingerprint: &Fingerprint,
) -> Result<RealityDeviation, LedgerError> {
    let span = tracing::info_span!("rll.evaluate");
    let _guard = span.enter();

    let singularities: Vec<DecisionSingularity> =
        ledger.entries()?.into_iter().map(|entry| entry.payload).collect();
    let deviation = enforce_singularities(&singularities, fingerprint);

    if let RealityDeviation::Forbidden { singularity_id, causing_run, .. } = &deviation {
        tracing::warn!(
            singularity_id = %singularity_id,
            causing_run = %causing_run,
            "reality lock ledger forbade this fingerprint"
        );
    }
    Ok(deviation)
}

/// Declares a new reality lock and persists it.
///
/// # Errors
/// Returns [`LedgerError`] if the append fails.
pub fn declare(
    ledger: &mut SingularityLedger,
    singularity: DecisionSingularity,
) -> Result<(), LedgerError> {
    ledger.append(singularity)?;
    Ok(())
}

/// Returns every singularity currently active, in ledger order.
///
/// # Errors
/// Returns [`LedgerError`] if the ledger cannot be read.
pub fn active(ledger: &SingularityLedger) -> Result<Vec<DecisionSingularity>, LedgerError> {
    Ok(ledger.entries()?.into_iter().map(|entry| entry.payload).collect())
}
