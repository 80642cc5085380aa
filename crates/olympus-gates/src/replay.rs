// crates/olympus-gates/src/replay.rs
// ============================================================================
// Module: Counterfactual Replay
// Description: Read-only, pure "what-if" simulation of alternative handoff
// executions.
// Purpose: Give OCIC's intervention ranking (§4.4) and NE's survivability
// check (§4.9) a deterministic baseline-vs-counterfactual comparison.
// Dependencies: olympus_core::{shape, tier, trace}
// ============================================================================

//! ## Overview
//! Implements §4.5's exactly-three scenarios. Every function here is a pure
//! computation over a [`ShapeTraceResult`]; none of them touch a ledger or
//! mutate the live trace — replay never alters an execution, only informs
//! ranking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::tier::rsr;
use olympus_core::Criticality;
use olympus_core::ShapeTraceResult;

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// One of the three fixed counterfactual replay scenarios (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Assume every attribute the source agent held survives the handoff.
    SummarizationRemoved,
    /// Simulate the worst case: 50% attribute loss, to demonstrate an
    /// invariant's protection is causal.
    InvariantBypassed,
    /// The ideal upper bound: RSR = 1.0 throughout.
    FullAttributePreservation,
}

/// A baseline-vs-counterfactual comparison for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayComparison {
    /// The scenario this comparison was computed for.
    pub scenario: Scenario,
    /// The shape's actually-observed RSR this run.
    pub baseline_rsr: f64,
    /// The RSR the scenario projects.
    pub counterfactual_rsr: f64,
    /// `counterfactual_rsr - baseline_rsr`.
    pub rsr_delta: f64,
    /// `true` if the counterfactual RSR would have satisfied the shape's
    /// tier law where the baseline did not.
    pub would_have_prevented_loss: bool,
}

/// Runs one counterfactual replay scenario against a shape's observed trace.
#[must_use]
pub fn replay(
    scenario: Scenario,
    criticality: Criticality,
    trace: &ShapeTraceResult,
) -> ReplayComparison {
    let required = trace
        .attributes_per_stage
        .values()
        .map(std::collections::BTreeSet::len)
        .max()
        .unwrap_or(0);
    let baseline_rsr = trace.overall_rsr;

    let counterfactual_rsr = match scenario {
        Scenario::SummarizationRemoved => {
            let recovered = trace
                .handoff_diffs
                .iter()
                .filter(|diff| diff.summarization_invoked)
                .map(|diff| diff.attributes_lost.len())
                .sum::<usize>();
            let present =
                (trace.survival_status.present_attributes.len() + recovered).min(required);
            rsr(present, required)
        }
        Scenario::InvariantBypassed => {
            let present = trace.survival_status.present_attributes.len() / 2;
            rsr(present, required)
        }
        Scenario::FullAttributePreservation => 1.0,
    };

    let tolerated = trace
        .handoff_diffs
        .iter()
        .filter_map(|diff| diff.loss_class)
        .collect::<Vec<_>>();
    let baseline_met = olympus_core::tier::tier_met(criticality, baseline_rsr, &tolerated);
    let counterfactual_met =
        olympus_core::tier::tier_met(criticality, counterfactual_rsr, &[]);

    ReplayComparison {
        scenario,
        baseline_rsr,
        counterfactual_rsr,
        rsr_delta: counterfactual_rsr - baseline_rsr,
        would_have_prevented_loss: counterfactual_met && !baseline_met,
    }
}

// ============================================================================
// SECTION: Composition
// ============================================================================

/// How two composed scenarios' effects relate: do they reinforce or offset
/// each other?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionAnnotation {
    /// Combined delta exceeds the sum of the two individual deltas.
    Synergy,
    /// Combined delta is less than either individual delta alone.
    Interference,
    /// Neither synergy nor interference; effects are roughly additive.
    Neutral,
}

/// Composes two scenario comparisons for the same shape, used only for
/// ranking candidate interventions — never to alter the live execution
/// (§4.5).
#[must_use]
pub fn compose(a: ReplayComparison, b: ReplayComparison) -> (f64, CompositionAnnotation) {
    let combined_delta = (a.counterfactual_rsr.max(b.counterfactual_rsr) - a.baseline_rsr)
        .clamp(0.0, 1.0 - a.baseline_rsr);
    let additive = a.rsr_delta + b.rsr_delta;
    let annotation = if combined_delta > additive + f64::EPSILON {
        CompositionAnnotation::Synergy
    } else if combined_delta < additive.min(a.rsr_delta).min(b.rsr_delta) - f64::EPSILON {
        CompositionAnnotation::Interference
    } else {
        CompositionAnnotation::Neutral
    };
    (combined_delta, annotation)
}
