// crates/olympus-core/src/core/necessity.rs
// ============================================================================
// Module: OLYMPUS Necessary Future
// Description: The unique survivable future NE selects for a doomed fingerprint.
// Purpose: Model §4.9's selection and deterministic tie-break.
// Dependencies: crate::core::{fingerprint, intervention}, serde
// ============================================================================

//! ## Overview
//! At most one `NecessaryFuture` exists per doomed fingerprint. NE selects
//! it from the survivable MCCS candidates by `(cardinality asc, entropy
//! ceiling asc, stabilization step asc)`; a remaining tie is broken by
//! ascending `Mccs::id` (a content hash, never wall-clock — see
//! `DESIGN.md`), and the tie is recorded rather than silently resolved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::fingerprint::Fingerprint;
use crate::core::intervention::Mccs;

// ============================================================================
// SECTION: Necessary Future
// ============================================================================

/// The unique survivable future selected for a doomed fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NecessaryFuture {
    /// The action fingerprint this future was computed for.
    pub doomed_fingerprint: Fingerprint,
    /// The selected minimal causal cut set.
    pub mccs: Mccs,
    /// The highest entropy value reached across every explored path under
    /// this future.
    pub entropy_ceiling: f64,
    /// The first simulation step at which `|Δentropy| < 0.01` under this
    /// future.
    pub stabilization_step: u64,
    /// `true` if selection required the deterministic id tie-break because
    /// cardinality, entropy ceiling, and stabilization step all tied
    /// across two or more candidates.
    pub tie_recorded: bool,
    /// Required follow-up actions this future mandates; each becomes an
    /// ODL obligation (§4.15).
    pub required_actions: Vec<String>,
    /// The number of forward-simulation steps this future survived
    /// without collapse; a short value triggers an implicit
    /// `SURVIVABILITY_ACTION` obligation (§4.15).
    pub survivable_steps: u64,
}

/// One candidate future, prior to selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFuture {
    /// The candidate's minimal causal cut set.
    pub mccs: Mccs,
    /// Whether every explored path under this candidate is collapse-free.
    pub survivable: bool,
    /// Highest entropy value reached across its explored paths.
    pub entropy_ceiling: f64,
    /// First step at which `|Δentropy| < 0.01`.
    pub stabilization_step: u64,
    /// Forward-simulation steps survived without collapse.
    pub survivable_steps: u64,
}

/// Selects the unique [`NecessaryFuture`] from a set of candidates, per
/// §4.9's ordering: `(cardinality asc, entropy_ceiling asc,
/// stabilization_step asc)`, with a final deterministic tie-break on
/// ascending `Mccs::id`.
///
/// Returns `None` if no candidate is survivable (extinction, §4.9).
#[must_use]
pub fn select(
    doomed_fingerprint: &Fingerprint,
    candidates: &[CandidateFuture],
) -> Option<NecessaryFuture> {
    let mut survivable: Vec<&CandidateFuture> =
        candidates.iter().filter(|c| c.survivable).collect();
    if survivable.is_empty() {
        return None;
    }

    survivable.sort_by(|a, b| {
        a.mccs
            .interventions
            .len()
            .cmp(&b.mccs.interventions.len())
            .then_with(|| {
                a.entropy_ceiling
                    .partial_cmp(&b.entropy_ceiling)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.stabilization_step.cmp(&b.stabilization_step))
            .then_with(|| a.mccs.id.cmp(&b.mccs.id))
    });

    let winner = survivable[0];
    let tie_recorded = survivable.len() > 1
        && winner.mccs.interventions.len() == survivable[1].mccs.interventions.len()
        && (winner.entropy_ceiling - survivable[1].entropy_ceiling).abs() < f64::EPSILON
        && winner.stabilization_step == survivable[1].stabilization_step;

    Some(NecessaryFuture {
        doomed_fingerprint: doomed_fingerprint.clone(),
        mccs: winner.mccs.clone(),
        entropy_ceiling: winner.entropy_ceiling,
        stabilization_step: winner.stabilization_step,
        tie_recorded,
        required_actions: Vec::new(),
        survivable_steps: winner.survivable_steps,
    })
}
