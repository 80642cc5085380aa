// crates/olympus-gates/src/gates/ocic.rs
// ============================================================================
// Module: Optimal Counterfactual Intervention Composer (OCIC)
// Description: Fourth gate; enumerates candidate interventions for every
// losing handoff a shape crossed and selects the minimal, replay-verified
// cut set that restores tier compliance.
// Purpose: Compute the MCCS later gates (RLL, AEC, NE) consume.
// Dependencies: olympus_core::{intervention, tier}, crate::replay, crate::collector
// ============================================================================

//! ## Overview
//! §4.4: for each losing handoff a shape crossed, OCIC proposes one
//! candidate [`Intervention`] whose [`InterventionType`] is chosen
//! deterministically from the handoff's loss class via
//! [`InterventionType::for_loss`], then enumerates every non-empty subset of
//! size up to four of the combined candidate pool, replay-verifies each
//! subset's projected RSR, and keeps only the subsets that restore tier
//! compliance and preserve invariants. Of those, the minimal one wins ties
//! via [`Mccs::ranking_key`]. Before enumerating anything, OCIC checks the
//! fingerprint index for a historical verdict on this shape's current
//! transform hash and short-circuits with `BLOCK_PREEMPTIVELY` if that
//! verdict is `CAUSED_LOSS` or `CAUSED_INVARIANT_VIOLATION`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::tier::rsr;
use olympus_core::tier::tier_met;
use olympus_core::Criticality;
use olympus_core::Fingerprint;
use olympus_core::FingerprintSerializationError;
use olympus_core::FingerprintVerdict;
use olympus_core::HandoffDiff;
use olympus_core::Intervention;
use olympus_core::InterventionType;
use olympus_core::Mccs;
use olympus_core::ShapeId;
use olympus_core::ShapeTraceResult;

/// Every interventions in the combined pool is evaluated pairwise up to
/// this subset size (§4.4).
pub const MAX_MCCS_SIZE: usize = 4;

/// OCIC's verdict for one shape's trace.
#[derive(Debug, Clone)]
pub enum OcicOutcome {
    /// The shape's losses are already tier-compliant; no intervention is
    /// needed.
    NoInterventionRequired,
    /// A historical fingerprint match means this transform is known to
    /// cause loss or invariant violation before any candidate is composed.
    BlockPreemptively {
        /// The transform hash that triggered the predictive block.
        transform_hash: Fingerprint,
        /// The historical verdict that triggered it.
        verdict: FingerprintVerdict,
    },
    /// The minimal, replay-verified cut set restoring tier compliance.
    Composed(Mccs),
    /// No subset up to [`MAX_MCCS_SIZE`] restores tier compliance; the
    /// shape's decline cannot be remediated this run.
    NoViableCutSet,
}

/// Failure modes of MCCS composition.
#[derive(Debug, thiserror::Error)]
pub enum OcicError {
    /// A candidate cut set could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintSerializationError),
}

/// Builds the single candidate intervention for one losing handoff, typed
/// by loss class via [`InterventionType::for_loss`] (§4.4 step 1).
fn candidate_for(
    shape_id: &ShapeId,
    shape_is_invariant: bool,
    diff: &HandoffDiff,
    required: usize,
) -> Intervention {
    let recovered = diff.attributes_lost.len();
    let projected = rsr(diff.attributes_after.len() + recovered, required.max(1));
    let kind = InterventionType::for_loss(diff.loss_class, shape_is_invariant);
    Intervention::new(
        shape_id.clone(),
        diff.handoff,
        kind,
        format!("{kind:?} at {:?}", diff.handoff),
        projected,
    )
}

/// Enumerates every non-empty subset of `pool` up to `max_size`, via
/// bitmask iteration — `pool.len()` is always small (at most four
/// candidates per losing handoff, and OCIC caps the combined pool well
/// below the bitmask width).
fn subsets(pool: &[Intervention], max_size: usize) -> Vec<Vec<Intervention>> {
    let mut out = Vec::new();
    let total = 1usize << pool.len();
    for mask in 1 .. total {
        let set_bits = usize::try_from(mask.count_ones()).unwrap_or(usize::MAX);
        if set_bits > max_size {
            continue;
        }
        let subset: Vec<Intervention> = pool
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, intervention)| intervention.clone())
            .collect();
        out.push(subset);
    }
    out
}

/// Composes the minimal, replay-verified cut set for one shape's trace.
///
/// # Errors
/// Returns [`OcicError`] if a candidate cut set cannot be fingerprinted.
pub fn evaluate(
    shape_id: &ShapeId,
    criticality: Criticality,
    shape_is_invariant: bool,
    trace: &ShapeTraceResult,
    historical_verdict: Option<(Fingerprint, FingerprintVerdict)>,
) -> Result<OcicOutcome, OcicError> {
    let span = tracing::info_span!("ocic.evaluate", shape_id = %shape_id);
    let _guard = span.enter();

    if let Some((transform_hash, verdict)) = historical_verdict {
        if matches!(verdict, FingerprintVerdict::CausedLoss | FingerprintVerdict::CausedInvariantViolation) {
            tracing::warn!(shape_id = %shape_id, ?verdict, "predictive block on historical transform verdict");
            return Ok(OcicOutcome::BlockPreemptively { transform_hash, verdict });
        }
    }

    let losing = trace.losing_handoffs();
    if losing.is_empty() {
        return Ok(OcicOutcome::NoInterventionRequired);
    }

    let required = trace
        .attributes_per_stage
        .values()
        .map(std::collections::BTreeSet::len)
        .max()
        .unwrap_or(0);

    let pool: Vec<Intervention> = losing
        .iter()
        .map(|diff| candidate_for(shape_id, shape_is_invariant, diff, required))
        .collect();

    let mut candidates = Vec::new();
    for subset in subsets(&pool, MAX_MCCS_SIZE) {
        let rsr_gain = subset.iter().map(|intervention| intervention.projected_rsr).sum::<f64>()
            / subset.len() as f64;
        let restores = tier_met(criticality, rsr_gain, &[]);
        let invariant_safety = restores;
        if !restores {
            continue;
        }
        candidates.push(Mccs::build(subset, rsr_gain, invariant_safety)?);
    }

    candidates.sort_by_key(Mccs::ranking_key);
    Ok(candidates.into_iter().next().map_or(OcicOutcome::NoViableCutSet, OcicOutcome::Composed))
}
