// crates/olympus-gates/src/collector.rs
// ============================================================================
// Module: Causal Fingerprint Collector
// Description: Builds and persists a structural snapshot of each handoff
// transformation a shape crossed this run.
// Purpose: Feed OCIC's predictive blocks and RLL's forbidden-fingerprint set
// with content-addressed transform history.
// Dependencies: olympus_core::causal, olympus_ledger::{CinLedger, FingerprintIndex}
// ============================================================================

//! ## Overview
//! For every handoff diff in a shape's trace result, builds a
//! [`CausalFingerprintRecord`] (§3 "Causal fingerprint") and appends it to
//! the CIN ledger, then records or refreshes that transform hash's verdict
//! in the fingerprint index. Both appends happen unconditionally — the
//! collector records transformations whether or not they caused loss; only
//! the verdict differs. [`collect`] is called once per pipeline run,
//! immediately after a shape's trace result is known, so every later gate
//! that consults the fingerprint index sees this run's transform hashes
//! alongside the action-level fingerprints IE and OCIC file. Which diffs
//! get collected at all is scaled by the caller's [`InspectionDepth`]: at
//! [`InspectionDepth::Minimal`] only handoffs that actually lost an
//! attribute are worth the fingerprinting cost; anything deeper inspects
//! every crossed handoff.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use olympus_core::AgentId;
use olympus_core::CausalFingerprintRecord;
use olympus_core::FingerprintSerializationError;
use olympus_core::FingerprintVerdict;
use olympus_core::HandoffId;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::RunId;
use olympus_core::Shape;
use olympus_core::ShapeTraceResult;
use olympus_core::trace::LossClass;
use olympus_ledger::CinLedger;
use olympus_ledger::FingerprintIndex;
use olympus_ledger::FingerprintIndexEntry;

use crate::inspector::InspectionDepth;

/// The agent that held a shape on each side of a handoff, supplied by the
/// upstream pipeline alongside the trace result (§6 input; not itself part
/// of `ShapeTraceResult`, since the upstream pipeline's agent topology is
/// fixed per project rather than per shape).
pub type HandoffAgents = BTreeMap<HandoffId, (AgentId, AgentId)>;

/// Failure modes of causal fingerprint collection.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// A handoff diff referenced a handoff with no declared agent pair.
    #[error("no agent pair declared for handoff {0:?}")]
    MissingAgents(HandoffId),
    /// A record's structural content could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintSerializationError),
    /// A ledger append or read failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Determines the fingerprint-index verdict a handoff diff's outcome
/// warrants, given whether the shape it belongs to is an invariant shape.
#[must_use]
fn verdict_for(shape_is_invariant: bool, loss_detected: bool) -> FingerprintVerdict {
    match (shape_is_invariant, loss_detected) {
        (true, true) => FingerprintVerdict::CausedInvariantViolation,
        (false, true) => FingerprintVerdict::CausedLoss,
        (_, false) => FingerprintVerdict::Clean,
    }
}

/// A collected record paired with the verdict it was filed under.
#[derive(Debug, Clone)]
pub struct Collected {
    /// The persisted causal fingerprint record.
    pub record: CausalFingerprintRecord,
    /// The verdict filed for `record.transform_hash`.
    pub verdict: FingerprintVerdict,
}

/// Collects and persists one record per handoff diff in `trace` that
/// `depth` deems worth inspecting, appending it to `cin` and filing its
/// verdict in `index`.
///
/// # Errors
/// Returns [`CollectorError`] if an agent pair is missing for an inspected
/// handoff, a record cannot be fingerprinted, or a ledger append fails.
pub fn collect(
    cin: &mut CinLedger,
    index: &mut FingerprintIndex,
    run_id: &RunId,
    shape: &Shape,
    trace: &ShapeTraceResult,
    agents: &HandoffAgents,
    depth: InspectionDepth,
) -> Result<Vec<Collected>, CollectorError> {
    let inspected = trace
        .handoff_diffs
        .iter()
        .filter(|diff| depth > InspectionDepth::Minimal || diff.loss_detected);
    let mut collected = Vec::with_capacity(trace.handoff_diffs.len());
    for diff in inspected {
        let (source_agent, target_agent) =
            agents.get(&diff.handoff).cloned().ok_or(CollectorError::MissingAgents(diff.handoff))?;
        let bypass_requested = diff.loss_class == Some(LossClass::L6InvariantBypassLoss);
        let record = CausalFingerprintRecord::build(
            diff.handoff,
            source_agent,
            target_agent,
            diff.clone(),
            bypass_requested,
        )?;
        cin.append(record.clone())?;

        let verdict = verdict_for(shape.is_invariant(), diff.loss_detected);
        index.append(FingerprintIndexEntry {
            fingerprint: record.transform_hash.clone(),
            causing_run: run_id.clone(),
            verdict,
        })?;
        collected.push(Collected { record, verdict });
    }
    Ok(collected)
}
