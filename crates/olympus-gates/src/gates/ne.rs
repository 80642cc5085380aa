// crates/olympus-gates/src/gates/ne.rs
// ============================================================================
// Module: Necessity Engine (NE)
// Description: Sixth gate; forward-simulates each OCIC candidate cut set to
// depth ten and selects the unique necessary future.
// Purpose: Turn a set of replay-verified cut sets into the one future the
// run is obligated to pursue.
// Dependencies: olympus_core::{entropy, necessity}, crate::gates::ocic
// ============================================================================

//! ## Overview
//! §4.9: NE advances each candidate's entropy state forward by repeatedly
//! applying [`EntropyComponents::weighted_score`] with the candidate's
//! projected RSR gain folded in as an improvement to `rsr_trend`, up to
//! [`SIMULATION_DEPTH`] steps. A candidate is survivable if it never
//! reaches [`Phase::Dead`] within that horizon. The entropy ceiling is the
//! highest value reached; the stabilization step is the first step where
//! successive entropy values differ by less than
//! [`STABILIZATION_EPSILON`]. [`olympus_core::select_necessary_future`]
//! then applies the fixed selection order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::select_necessary_future;
use olympus_core::CandidateFuture;
use olympus_core::EntropyComponents;
use olympus_core::Fingerprint;
use olympus_core::Mccs;
use olympus_core::NecessaryFuture;
use olympus_core::Phase;

/// Forward-simulation horizon (§4.9).
pub const SIMULATION_DEPTH: u64 = 10;

/// Entropy delta below which a simulation is considered stabilized (§4.9).
pub const STABILIZATION_EPSILON: f64 = 0.01;

/// Forward-simulates one candidate cut set from a starting entropy
/// snapshot, improving `rsr_trend` in proportion to the cut set's projected
/// RSR gain each step.
#[must_use]
pub fn simulate(mccs: &Mccs, starting: EntropyComponents) -> CandidateFuture {
    let improvement_per_step = mccs.rsr_gain / (SIMULATION_DEPTH as f64);
    let mut components = starting;
    let mut previous_value = components.weighted_score();
    let mut ceiling = previous_value;
    let mut stabilization_step = SIMULATION_DEPTH;
    let mut stabilized = false;
    let mut phase = Phase::from_entropy(previous_value);
    let mut collapsed = matches!(phase, Phase::Dead);
    let mut survived_steps = 0u64;

    for step in 1 ..= SIMULATION_DEPTH {
        components = EntropyComponents::new(
            (components.rsr_trend - improvement_per_step).max(0.0),
            components.mortality_velocity,
            components.singularity_density,
            components.mccs_size,
        );
        let value = components.weighted_score();
        ceiling = ceiling.max(value);
        phase = Phase::apply_monotonicity(phase, Phase::from_entropy(value), true);
        if matches!(phase, Phase::Dead) {
            collapsed = true;
            break;
        }
        survived_steps = step;
        if !stabilized && (value - previous_value).abs() < STABILIZATION_EPSILON {
            stabilization_step = step;
            stabilized = true;
        }
        previous_value = value;
    }

    CandidateFuture {
        mccs: mccs.clone(),
        survivable: !collapsed,
        entropy_ceiling: ceiling,
        stabilization_step,
        survivable_steps: survived_steps,
    }
}

/// Simulates every candidate and selects the unique necessary future.
#[must_use]
pub fn evaluate(
    doomed_fingerprint: &Fingerprint,
    candidates: &[Mccs],
    starting: EntropyComponents,
) -> Option<NecessaryFuture> {
    let span = tracing::info_span!("ne.evaluate");
    let _guard = span.enter();

    let futures: Vec<CandidateFuture> =
        candidates.iter().map(|mccs| simulate(mccs, starting)).collect();
    let selected = select_necessary_future(doomed_fingerprint, &futures);

    match &selected {
        Some(future) if future.tie_recorded => {
            tracing::warn!(
                doomed_fingerprint = %doomed_fingerprint,
                "necessity engine recorded a tie at the final deterministic tie-break"
            );
        }
        None => {
            tracing::warn!(doomed_fingerprint = %doomed_fingerprint, "no candidate future is survivable: extinction");
        }
        _ => {}
    }
    selected
}
