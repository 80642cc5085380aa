// crates/olympus-gates/src/gates/ie.rs
// ============================================================================
// Module: Inevitability Engine (IE)
// Description: First gate in the pipeline; forward-expands an attempted
// action to a bounded depth and vetoes it if every reachable future
// collapses or every path's remediation burden grows without bound.
// Purpose: Stop a doomed action before any other gate spends work on it.
// Dependencies: olympus_core::{action, entropy, fingerprint}, olympus_ledger::{FingerprintIndex, InevitabilityLedger}
// ============================================================================

//! ## Overview
//! §4.8: the Inevitability Engine expands an [`AttemptedAction`] forward by
//! applying a fixed, deterministic transition function up to a depth of
//! five, fingerprinting every node it reaches. Each frontier node seeds its
//! own forward projection of `(entropy, phase, mccs_size)`, advanced step by
//! step with no randomness (see [`project_path`]). A path leads to collapse
//! if any step reaches [`Phase::Collapsing`] or worse; the action is
//! **inevitable** — and vetoed — iff either every path collapses, or every
//! path's projected MCCS size grows monotonically with no survivable
//! ceiling. Once a root fingerprint is filed as doomed, a later match
//! short-circuits straight to veto without re-simulating anything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use olympus_core::AttemptedAction;
use olympus_core::Decision;
use olympus_core::EntropyComponents;
use olympus_core::Fingerprint;
use olympus_core::FingerprintSerializationError;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::Phase;
use olympus_core::ShapeTraceResult;
use olympus_ledger::FingerprintIndex;
use olympus_ledger::FingerprintIndexEntry;
use olympus_ledger::InevitabilityLedger;
use olympus_ledger::InevitabilityRecord;

/// Maximum forward-expansion depth (§4.8).
pub const MAX_EXPANSION_DEPTH: u8 = 5;

/// Per-step MCCS-size growth attributed to one unit of loss pressure.
const MCCS_GROWTH_PER_STEP: f64 = 0.15;

/// Per-step `rsr_trend` drift attributed to one unit of expansion depth.
const RSR_DRIFT_PER_DEPTH: f64 = 0.01;

/// A single forward-expansion step. The transition function is
/// deterministic — the same action always expands to the same ordered set
/// of descendants — and must perturb a structurally-fingerprinted field,
/// since [`AttemptedAction::description`] does not participate in the
/// action signature.
fn expand_one(action: &AttemptedAction, step: u8) -> AttemptedAction {
    let mut next = action.clone();
    next.transform_types.insert(format!("ie.expansion.{step}"));
    next
}

/// One node reached during forward expansion.
#[derive(Debug, Clone)]
pub struct ExpansionNode {
    /// Depth at which this node was reached, `0` being the root action.
    pub depth: u8,
    /// The fingerprint of this node's structural signature.
    pub fingerprint: Fingerprint,
}

/// The projected `(entropy, phase, mccs_size)` trajectory seeded from one
/// expansion node, advanced [`MAX_EXPANSION_DEPTH`] steps by the
/// deterministic transition in [`project_path`].
#[derive(Debug, Clone)]
pub struct PathProjection {
    /// The expansion node this path was seeded from.
    pub depth: u8,
    /// `true` if any projected step reached [`Phase::Collapsing`] or worse.
    pub leads_to_collapse: bool,
    /// `true` if the projected MCCS size rose at every step with a net
    /// increase across the whole path — an unbounded remediation burden.
    pub mccs_size_monotonic_growth: bool,
}

/// Advances `starting` forward by [`MAX_EXPANSION_DEPTH`] steps, seeded from
/// expansion node `depth`, using a fixed deterministic transition: each step
/// drifts `rsr_trend` by the node's depth and grows `mccs_size` by the
/// trace's loss pressure (the fraction of crossed handoffs that lost an
/// attribute). No step depends on anything but `starting`, `depth`,
/// `loss_pressure`, and the step index.
#[must_use]
pub fn project_path(starting: EntropyComponents, depth: u8, loss_pressure: f64) -> PathProjection {
    let mut components = starting;
    let mut phase = Phase::from_entropy(components.weighted_score());
    let mut leads_to_collapse = phase >= Phase::Collapsing;
    let mut mccs_sizes = vec![components.mccs_size];

    for _step in 1 ..= MAX_EXPANSION_DEPTH {
        components = EntropyComponents::new(
            components.rsr_trend + RSR_DRIFT_PER_DEPTH * f64::from(depth),
            components.mortality_velocity,
            components.singularity_density,
            components.mccs_size + MCCS_GROWTH_PER_STEP * loss_pressure,
        );
        mccs_sizes.push(components.mccs_size);
        let value = components.weighted_score();
        phase = Phase::apply_monotonicity(phase, Phase::from_entropy(value), true);
        if phase >= Phase::Collapsing {
            leads_to_collapse = true;
        }
    }

    let mccs_size_monotonic_growth = mccs_sizes.windows(2).all(|pair| pair[1] >= pair[0])
        && mccs_sizes.last() > mccs_sizes.first();

    PathProjection { depth, leads_to_collapse, mccs_size_monotonic_growth }
}

/// The fraction of `trace`'s crossed handoffs that lost an attribute, in
/// `[0, 1]`. Zero when the trace crossed no handoffs.
#[must_use]
fn loss_pressure(trace: &ShapeTraceResult) -> f64 {
    if trace.handoff_diffs.is_empty() {
        return 0.0;
    }
    let lost = trace.handoff_diffs.iter().filter(|diff| diff.loss_detected).count();
    #[allow(clippy::cast_precision_loss, reason = "handoff counts are always small")]
    let ratio = lost as f64 / trace.handoff_diffs.len() as f64;
    ratio
}

/// The Inevitability Engine's verdict for one attempted action.
#[derive(Debug, Clone)]
pub struct InevitabilityVerdict {
    /// The fingerprint of the root attempted action.
    pub root_fingerprint: Fingerprint,
    /// Every node visited during expansion, root first.
    pub frontier: Vec<ExpansionNode>,
    /// The forward `(entropy, phase, mccs_size)` projection seeded from
    /// each frontier node.
    pub paths: Vec<PathProjection>,
    /// `true` if this run short-circuited on a previously filed doomed
    /// fingerprint, without re-simulating `paths`.
    pub short_circuited: bool,
    /// `true` if every path collapses, or every path's MCCS size grows
    /// monotonically with no survivable ceiling — the action has no
    /// survivable future and must be vetoed.
    pub vetoed: bool,
}

/// Failure modes of inevitability expansion.
#[derive(Debug, thiserror::Error)]
pub enum InevitabilityError {
    /// A node's structural signature could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintSerializationError),
    /// The doomed-fingerprint registry could not be read or appended.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Evaluates one attempted action: checks the doomed-fingerprint registry
/// for a short-circuit first, then — if none matched — forward-expands the
/// action and projects each frontier node's entropy trajectory to prove or
/// disprove inevitability independently of prior history.
///
/// # Errors
/// Returns [`InevitabilityError`] if a node cannot be fingerprinted or the
/// registry cannot be read.
pub fn evaluate(
    action: &AttemptedAction,
    trace: &ShapeTraceResult,
    entropy_components: EntropyComponents,
    registry: &FingerprintIndex,
) -> Result<InevitabilityVerdict, InevitabilityError> {
    let span = tracing::info_span!("ie.evaluate", action_id = %action.action_id);
    let _guard = span.enter();

    let root_fingerprint = olympus_core::ActionSignature::compute(action)?.fingerprint;

    let doomed: BTreeSet<Fingerprint> = registry
        .entries()?
        .into_iter()
        .filter(|entry| {
            matches!(
                entry.payload.verdict,
                olympus_core::FingerprintVerdict::CausedInvariantViolation
            )
        })
        .map(|entry| entry.payload.fingerprint)
        .collect();

    let mut frontier = vec![ExpansionNode { depth: 0, fingerprint: root_fingerprint.clone() }];
    let mut current = action.clone();
    for depth in 1 ..= MAX_EXPANSION_DEPTH {
        current = expand_one(&current, depth);
        let node_fingerprint = olympus_core::ActionSignature::compute(&current)?.fingerprint;
        frontier.push(ExpansionNode { depth, fingerprint: node_fingerprint });
    }

    if doomed.contains(&root_fingerprint) {
        tracing::warn!(action_id = %action.action_id, "inevitability engine short-circuited on a previously filed doomed fingerprint");
        return Ok(InevitabilityVerdict {
            root_fingerprint,
            frontier,
            paths: Vec::new(),
            short_circuited: true,
            vetoed: true,
        });
    }

    let pressure = loss_pressure(trace);
    let paths: Vec<PathProjection> =
        frontier.iter().map(|node| project_path(entropy_components, node.depth, pressure)).collect();

    let all_collapse = !paths.is_empty() && paths.iter().all(|path| path.leads_to_collapse);
    let all_grow_unboundedly =
        !paths.is_empty() && paths.iter().all(|path| path.mccs_size_monotonic_growth);
    let vetoed = all_collapse || all_grow_unboundedly;

    if vetoed {
        tracing::warn!(
            action_id = %action.action_id,
            all_collapse,
            all_grow_unboundedly,
            "inevitability engine vetoed action: every forward-projected path has no survivable future"
        );
    }

    Ok(InevitabilityVerdict { root_fingerprint, frontier, paths, short_circuited: false, vetoed })
}

/// Records one run's verdict to the inevitability history ledger.
///
/// # Errors
/// Returns [`LedgerError`] if the append fails.
pub fn record(
    ledger: &mut InevitabilityLedger,
    run_id: olympus_core::RunId,
    verdict: &InevitabilityVerdict,
) -> Result<(), LedgerError> {
    let decision = if verdict.vetoed { Decision::Block } else { Decision::Allow };
    let forbidden_alternatives =
        if verdict.vetoed { vec![verdict.root_fingerprint.clone()] } else { Vec::new() };
    ledger.append(InevitabilityRecord {
        run_id,
        action_fingerprint: verdict.root_fingerprint.clone(),
        decision,
        forbidden_alternatives,
    })?;
    Ok(())
}

/// Files the root fingerprint as doomed in the fingerprint index when a veto
/// occurs and it wasn't already filed, so a future run's expansion
/// recognizes this exact structural signature without re-walking the
/// frontier.
///
/// # Errors
/// Returns [`LedgerError`] if the append fails.
pub fn file_doomed(
    index: &mut FingerprintIndex,
    run_id: olympus_core::RunId,
    verdict: &InevitabilityVerdict,
) -> Result<(), LedgerError> {
    if verdict.vetoed && !verdict.short_circuited {
        index.append(FingerprintIndexEntry {
            fingerprint: verdict.root_fingerprint.clone(),
            causing_run: run_id,
            verdict: olympus_core::FingerprintVerdict::CausedInvariantViolation,
        })?;
    }
    Ok(())
}
