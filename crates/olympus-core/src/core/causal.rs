// crates/olympus-core/src/core/causal.rs
// ============================================================================
// Module: OLYMPUS Causal Fingerprint
// Description: Per-handoff structural snapshot persisted by the Causal
// Fingerprint Collector.
// Purpose: Give every handoff transformation a content-addressed record.
// Dependencies: crate::core::{fingerprint, identifiers}, serde
// ============================================================================

//! ## Overview
//! Implements §3 "Causal fingerprint": a structural snapshot of each handoff
//! transformation, persisted append-only to the fingerprint index
//! (`fingerprints/<run>/`, §6). `invariant_bypass_granted` is always
//! `false` — OLYMPUS never grants an invariant bypass; only the *request*
//! is ever observed and recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::fingerprint::fingerprint;
use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::FingerprintSerializationError;
use crate::core::identifiers::AgentId;
use crate::core::identifiers::HandoffId;
use crate::core::trace::HandoffDiff;

// ============================================================================
// SECTION: Fingerprint Verdict
// ============================================================================

/// The historical verdict recorded against a transform hash in the
/// fingerprint index.
///
/// # Invariants
/// - Variants are stable for serialization and OCIC's predictive-block
///   lookup (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintVerdict {
    /// No adverse outcome has been observed for this transform hash yet.
    Clean,
    /// This transform hash has previously caused an attribute loss.
    CausedLoss,
    /// This transform hash has previously caused an invariant violation.
    CausedInvariantViolation,
}

// ============================================================================
// SECTION: Causal Fingerprint Record
// ============================================================================

/// A structural snapshot of one handoff transformation.
///
/// # Invariants
/// - `invariant_bypass_granted` is always `false`; OLYMPUS records bypass
///   *requests* but never grants one.
/// - `transform_hash` is the fingerprint of `(handoff, shape_delta,
///   summarization_data)`, excluding agent identifiers and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalFingerprintRecord {
    /// The handoff this record describes.
    pub handoff: HandoffId,
    /// Content-addressed hash of the transform applied at this handoff.
    pub transform_hash: Fingerprint,
    /// The agent that held the shape before the handoff.
    pub source_agent: AgentId,
    /// The agent that receives the shape after the handoff.
    pub target_agent: AgentId,
    /// The attribute-level structural diff for the handoff.
    pub shape_delta: HandoffDiff,
    /// Whether summarization was invoked during the handoff.
    pub summarization_invoked: bool,
    /// Whether an invariant bypass was requested during the handoff.
    pub invariant_bypass_requested: bool,
    /// Whether an invariant bypass was granted. Always `false`.
    pub invariant_bypass_granted: bool,
}

impl CausalFingerprintRecord {
    /// Builds a record from a handoff diff, computing its transform hash.
    ///
    /// # Errors
    /// Returns [`FingerprintSerializationError`] only if the diff cannot be
    /// serialized.
    pub fn build(
        handoff: HandoffId,
        source_agent: AgentId,
        target_agent: AgentId,
        shape_delta: HandoffDiff,
        invariant_bypass_requested: bool,
    ) -> Result<Self, FingerprintSerializationError> {
        #[derive(Serialize)]
        struct Structural<'a> {
            handoff: HandoffId,
            attributes_before: &'a std::collections::BTreeSet<String>,
            attributes_after: &'a std::collections::BTreeSet<String>,
            summarization_invoked: bool,
        }
        let transform_hash = fingerprint(&Structural {
            handoff,
            attributes_before: &shape_delta.attributes_before,
            attributes_after: &shape_delta.attributes_after,
            summarization_invoked: shape_delta.summarization_invoked,
        })?;

        let summarization_invoked = shape_delta.summarization_invoked;
        Ok(Self {
            handoff,
            transform_hash,
            source_agent,
            target_agent,
            shape_delta,
            summarization_invoked,
            invariant_bypass_requested,
            invariant_bypass_granted: false,
        })
    }
}
