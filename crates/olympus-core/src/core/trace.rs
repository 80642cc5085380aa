// crates/olympus-core/src/core/trace.rs
// ============================================================================
// Module: OLYMPUS Trace Results
// Description: Per-handoff structural diffs and per-shape survival outcomes.
// Purpose: Model the upstream agent pipeline's reported trace data (§6 input).
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! The upstream agent pipeline (out of scope — see crate root docs) reports,
//! for each shape, what attributes were observed at each stage and what was
//! lost at each handoff. OLYMPUS consumes this as an external input; it does
//! not compute it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::HandoffId;
use crate::core::identifiers::ShapeId;
use crate::core::identifiers::StageId;

// ============================================================================
// SECTION: Loss Classification
// ============================================================================

/// The classification of an attribute loss at a handoff.
///
/// # Invariants
/// - Variants are stable for serialization and tolerated-loss matching
///   against the tier law table (`crate::core::tier`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossClass {
    /// Loss of specificity (detail narrowed, not removed).
    L3SpecificityLoss,
    /// Loss via aggressive summarization.
    L4SummarizationLoss,
    /// Loss via a schema mismatch between stages.
    L7SchemaMismatch,
    /// Loss of a bypass-protected attribute with no milder classification.
    L6InvariantBypassLoss,
    /// Unclassified structural loss.
    Unclassified,
}

// ============================================================================
// SECTION: Per-Handoff Diff
// ============================================================================

/// The structural diff captured for one shape crossing one handoff.
///
/// # Invariants
/// - `attributes_lost = attributes_before \ attributes_after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffDiff {
    /// The handoff this diff describes.
    pub handoff: HandoffId,
    /// Whether any attribute was lost at this handoff.
    pub loss_detected: bool,
    /// Classification of the loss, if any.
    pub loss_class: Option<LossClass>,
    /// Attributes present before the handoff.
    pub attributes_before: BTreeSet<String>,
    /// Attributes present after the handoff.
    pub attributes_after: BTreeSet<String>,
    /// Attributes present before but absent after.
    pub attributes_lost: BTreeSet<String>,
    /// Whether a summarization transform was invoked during this handoff.
    pub summarization_invoked: bool,
}

// ============================================================================
// SECTION: Survival Status
// ============================================================================

/// Whether and where a shape survived the pipeline.
///
/// # Invariants
/// - `failure_point`/`failure_class` are `Some` iff `survived_to_target` is
///   `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalStatus {
    /// Whether the shape's required attributes all reached the target stage.
    pub survived_to_target: bool,
    /// The handoff at which the shape first failed to survive, if any.
    pub failure_point: Option<HandoffId>,
    /// The loss classification at `failure_point`, if any.
    pub failure_class: Option<LossClass>,
    /// **Supplement**: the attribute set actually present at the target
    /// stage. Implied by §3's RSR definition (`attributes_present_at_target
    /// / attributes_required`) but not spelled out as a field in its own
    /// right; kept explicit here so ORIS and the counterfactual replay
    /// engine can both compute RSR from the same source of truth instead of
    /// re-deriving it from the per-handoff diff list.
    pub present_attributes: BTreeSet<String>,
}

// ============================================================================
// SECTION: Trace Result
// ============================================================================

/// The full trace result for one shape across one run.
///
/// # Invariants
/// - `overall_rsr` equals `present_attributes.len() as f64 /
///   required_attributes.len() as f64`, rounded to 4 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTraceResult {
    /// The shape this trace describes.
    pub shape_id: ShapeId,
    /// Attribute set observed at each stage.
    pub attributes_per_stage: BTreeMap<StageId, BTreeSet<String>>,
    /// Structural diffs for each handoff the shape crossed.
    pub handoff_diffs: Vec<HandoffDiff>,
    /// Survival outcome for this shape.
    pub survival_status: SurvivalStatus,
    /// Requirement Survival Ratio for this shape in this run.
    pub overall_rsr: f64,
}

impl ShapeTraceResult {
    /// Returns every handoff at which a loss was detected.
    #[must_use]
    pub fn losing_handoffs(&self) -> Vec<&HandoffDiff> {
        self.handoff_diffs.iter().filter(|diff| diff.loss_detected).collect()
    }

    /// Returns `true` if any attribute was lost anywhere along the trace.
    #[must_use]
    pub fn has_any_loss(&self) -> bool {
        self.handoff_diffs.iter().any(|diff| diff.loss_detected)
    }
}
