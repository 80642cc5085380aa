// crates/olympus-gates/src/gates/pcl.rs
// ============================================================================
// Module: Proof Continuity (PCL)
// Description: Tenth gate; walks recent proof-ledger entries for conflicts
// with the current attempt.
// Purpose: Stop a new ALLOW from silently contradicting a prior hard block.
// Dependencies: olympus_core::decision, olympus_ledger::ProofLedger
// ============================================================================

//! ## Overview
//! §4.13: scans recent [`OlympusDecisionProof`] entries for three kinds of
//! conflict: a **forbidden alternative** match (the new action fingerprint
//! equals a `forbidden_alternative` a prior proof recorded), an **active
//! invariant** conflict (a prior `BLOCK`/`PERMANENT_READ_ONLY` proof's hard
//! invariant remains unaddressed), and a **global** block (any prior
//! `PERMANENT_READ_ONLY` or budget-exhausted proof forbids every later
//! `ALLOW`). Only the nine named [`HARD_PRECEDENTS`] invariants require
//! refutation; everything else is informational.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::Decision;
use olympus_core::Fingerprint;
use olympus_core::InvariantId;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::OlympusDecisionProof;
use olympus_ledger::ProofLedger;

/// The nine hard precedent invariant names requiring refutation (§4.13).
/// Matched against [`InvariantId::as_str`].
pub const HARD_PRECEDENTS: [&str; 9] = [
    "ENTROPY_BUDGET_EXHAUSTED",
    "TEMPORAL_CONTRACT_MISSING",
    "TEMPORAL_CONTRACT_INVALID",
    "SINGULARITY_BREACH",
    "REALITY_LOCK_VIOLATED",
    "FUTURE_INEVITABILITY_VIOLATION",
    "ENTROPY_DRIFT_EXCEEDED",
    "MUTATION_LIMIT_EXCEEDED",
    "LIFESPAN_EXCEEDED",
];

fn is_hard_precedent(id: &InvariantId) -> bool {
    HARD_PRECEDENTS.contains(&id.as_str())
}

/// One unrefuted conflict PCL found against a prior proof.
#[derive(Debug, Clone)]
pub struct PrecedentConflict {
    /// The hash of the conflicting prior proof.
    pub prior_proof_hash: Fingerprint,
    /// The invariant the prior proof recorded.
    pub invariant: InvariantId,
    /// The specific kind of conflict detected.
    pub kind: ConflictKind,
}

/// The category of precedent conflict PCL detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The new action's fingerprint matches a prior forbidden alternative.
    ForbiddenAlternative,
    /// A prior BLOCK/PERMANENT_READ_ONLY proof's invariant remains active.
    ActiveInvariant,
    /// A prior PERMANENT_READ_ONLY or budget-exhausted proof globally
    /// forbids this ALLOW.
    Global,
}

/// PCL's verdict for one attempt.
#[derive(Debug, Clone)]
pub enum PclOutcome {
    /// No conflicting precedent was found.
    Clear,
    /// Every conflict found has since been refuted.
    RefutedClear {
        /// The prior proof hashes successfully refuted.
        refuted: Vec<Fingerprint>,
    },
    /// At least one hard precedent conflict remains unrefuted.
    Unrefuted {
        /// Every conflict requiring refutation, most recent first.
        conflicts: Vec<PrecedentConflict>,
    },
}

/// Scans the proof ledger for conflicts with `action_fingerprint`, assuming
/// the attempt resolves to `proposed_decision`. `refuted_precedents` lists
/// prior proof hashes the submitter has already refuted this run (validated
/// for authority sufficiency by AAM, not by this gate).
///
/// # Errors
/// Returns [`LedgerError`] if the proof ledger cannot be read.
pub fn evaluate(
    ledger: &ProofLedger,
    action_fingerprint: &Fingerprint,
    proposed_decision: Decision,
    refuted_precedents: &[Fingerprint],
) -> Result<PclOutcome, LedgerError> {
    let span = tracing::info_span!("pcl.evaluate");
    let _guard = span.enter();

    let mut conflicts = Vec::new();
    for entry in ledger.entries()?.into_iter().rev() {
        let proof: OlympusDecisionProof = entry.payload;

        if proof.forbidden_alternatives.contains(action_fingerprint) {
            if let Some(invariant) = proof.primary_invariant_violated.clone() {
                if is_hard_precedent(&invariant) {
                    conflicts.push(PrecedentConflict {
                        prior_proof_hash: proof.proof_hash.clone(),
                        invariant,
                        kind: ConflictKind::ForbiddenAlternative,
                    });
                }
            }
        }

        let prior_blocked =
            matches!(proof.final_decision, Decision::Block | Decision::PermanentReadOnly);
        if prior_blocked && matches!(proposed_decision, Decision::Allow) {
            if let Some(invariant) = proof.primary_invariant_violated.clone() {
                if is_hard_precedent(&invariant) {
                    conflicts.push(PrecedentConflict {
                        prior_proof_hash: proof.proof_hash.clone(),
                        invariant,
                        kind: ConflictKind::ActiveInvariant,
                    });
                }
            }
        }

        if matches!(proof.final_decision, Decision::PermanentReadOnly)
            && matches!(proposed_decision, Decision::Allow)
        {
            conflicts.push(PrecedentConflict {
                prior_proof_hash: proof.proof_hash.clone(),
                invariant: InvariantId::new("PERMANENT_READ_ONLY_PRECEDENT"),
                kind: ConflictKind::Global,
            });
        }
    }

    if conflicts.is_empty() {
        return Ok(PclOutcome::Clear);
    }

    let unrefuted: Vec<PrecedentConflict> = conflicts
        .iter()
        .filter(|conflict| !refuted_precedents.contains(&conflict.prior_proof_hash))
        .cloned()
        .collect();

    if unrefuted.is_empty() {
        tracing::info!(count = conflicts.len(), "all precedent conflicts were refuted");
        return Ok(PclOutcome::RefutedClear {
            refuted: conflicts.into_iter().map(|c| c.prior_proof_hash).collect(),
        });
    }

    tracing::warn!(count = unrefuted.len(), "unrefuted precedent conflict blocks this attempt");
    Ok(PclOutcome::Unrefuted { conflicts: unrefuted })
}
