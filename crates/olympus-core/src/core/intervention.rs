// crates/olympus-core/src/core/intervention.rs
// ============================================================================
// Module: OLYMPUS Interventions and MCCS
// Description: Candidate interventions and minimal causal cut sets.
// Purpose: Model OCIC's remediation candidates and their ranking (§4.4).
// Dependencies: crate::core::{fingerprint, identifiers}, serde
// ============================================================================

//! ## Overview
//! An [`Intervention`] is a single candidate structural change that could
//! restore compliance for one shape at one handoff. A [`Mccs`] (Minimal
//! Causal Cut Set) is a minimal set of interventions verified via replay to
//! restore tier compliance and preserve invariants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::core::fingerprint::fingerprint;
use crate::core::fingerprint::round_survivability;
use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::FingerprintSerializationError;
use crate::core::identifiers::HandoffId;
use crate::core::identifiers::ShapeId;
use crate::core::trace::LossClass;

// ============================================================================
// SECTION: Intervention
// ============================================================================

/// The kind of structural remediation an intervention applies.
///
/// # Invariants
/// - Chosen deterministically from loss class by [`InterventionType::for_loss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    /// Force an attribute to be carried through a handoff unmodified.
    AttributePreservation,
    /// Route around a summarization transform for the affected attributes.
    SummarizationBypass,
    /// Add enforcement for a declared invariant at the losing handoff.
    InvariantEnforcement,
    /// Add a new extraction path so a lost attribute can be recovered.
    ExtractionPathAdd,
}

impl InterventionType {
    /// Chooses the intervention type for one loss, by loss class and
    /// whether the shape it occurred on is an invariant shape (§4.4 step 1):
    /// `L6InvariantBypassLoss`/`L4SummarizationLoss` select
    /// [`Self::SummarizationBypass`]; an invariant shape otherwise selects
    /// [`Self::InvariantEnforcement`]; anything else selects
    /// [`Self::AttributePreservation`].
    #[must_use]
    pub fn for_loss(loss_class: Option<LossClass>, shape_is_invariant: bool) -> Self {
        match loss_class {
            Some(LossClass::L6InvariantBypassLoss | LossClass::L4SummarizationLoss) => {
                Self::SummarizationBypass
            }
            _ if shape_is_invariant => Self::InvariantEnforcement,
            _ => Self::AttributePreservation,
        }
    }
}

/// A single candidate remediation for one (shape, losing-handoff) pair.
///
/// # Invariants
/// - `projected_rsr` is produced by a counterfactual replay scenario
///   (§4.5), never measured from a live execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// The shape this intervention protects.
    pub target_shape: ShapeId,
    /// The handoff this intervention applies at.
    pub target_handoff: HandoffId,
    /// The kind of remediation.
    pub intervention_type: InterventionType,
    /// Free-text description of the structural change this intervention
    /// makes (opaque to ranking; informational only).
    pub structural_change: String,
    /// The RSR this intervention is projected to produce for its target
    /// shape, rounded to [`crate::core::fingerprint::SURVIVABILITY_PRECISION`].
    pub projected_rsr: f64,
}

impl Intervention {
    /// Builds an intervention, rounding `projected_rsr` for fingerprint
    /// stability.
    #[must_use]
    pub fn new(
        target_shape: ShapeId,
        target_handoff: HandoffId,
        intervention_type: InterventionType,
        structural_change: impl Into<String>,
        projected_rsr: f64,
    ) -> Self {
        Self {
            target_shape,
            target_handoff,
            intervention_type,
            structural_change: structural_change.into(),
            projected_rsr: round_survivability(projected_rsr),
        }
    }
}

// ============================================================================
// SECTION: Minimal Causal Cut Set
// ============================================================================

/// A minimal, replay-verified set of interventions restoring tier
/// compliance and preserving all invariants.
///
/// # Invariants
/// - No strict subset of `interventions` also restores compliance
///   (minimality is enforced by the OCIC algorithm, not by this type).
/// - `id` is the content hash of the sorted intervention set, never a
///   wall-clock-derived or insertion-order-derived value (see
///   `DESIGN.md`'s NE tie-breaking decision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mccs {
    /// Content-addressed identifier for this cut set.
    pub id: Fingerprint,
    /// The interventions composing this cut set.
    pub interventions: Vec<Intervention>,
    /// Aggregate RSR gain this cut set is projected to produce.
    pub rsr_gain: f64,
    /// Whether this cut set preserves every declared invariant.
    pub invariant_safety: bool,
}

impl Mccs {
    /// Builds an MCCS from an intervention set, computing its content-hash
    /// id from the set sorted by `(target_shape, target_handoff,
    /// intervention_type)`.
    ///
    /// # Errors
    /// Returns [`FingerprintSerializationError`] only if the intervention
    /// set cannot be serialized.
    pub fn build(
        mut interventions: Vec<Intervention>,
        rsr_gain: f64,
        invariant_safety: bool,
    ) -> Result<Self, FingerprintSerializationError> {
        interventions.sort_by(|a, b| {
            (&a.target_shape, a.target_handoff, a.intervention_type).cmp(&(
                &b.target_shape,
                b.target_handoff,
                b.intervention_type,
            ))
        });
        let id = fingerprint(&interventions)?;
        Ok(Self { id, interventions, rsr_gain: round_survivability(rsr_gain), invariant_safety })
    }

    /// The ranking key used by OCIC: `(intervention_count ascending,
    /// rsr_gain descending, invariant_safety descending)`.
    #[must_use]
    pub fn ranking_key(&self) -> MccsRankingKey {
        MccsRankingKey {
            intervention_count: self.interventions.len(),
            rsr_gain: self.rsr_gain,
            invariant_safety: self.invariant_safety,
            id: self.id.clone(),
        }
    }
}

/// A comparable ranking key for ordering candidate MCCS lists.
///
/// Orders by `(intervention_count asc, rsr_gain desc, invariant_safety
/// desc, id asc)` — the trailing `id` comparison is the deterministic
/// tie-break of last resort (see `DESIGN.md`).
#[derive(Debug, Clone, PartialEq)]
pub struct MccsRankingKey {
    /// Number of interventions in the cut set.
    pub intervention_count: usize,
    /// Aggregate projected RSR gain.
    pub rsr_gain: f64,
    /// Whether all invariants are preserved.
    pub invariant_safety: bool,
    /// Content-addressed id, used only to break exact ties.
    pub id: Fingerprint,
}

impl Eq for MccsRankingKey {}

impl PartialOrd for MccsRankingKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MccsRankingKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.intervention_count
            .cmp(&other.intervention_count)
            .then_with(|| {
                other
                    .rsr_gain
                    .partial_cmp(&self.rsr_gain)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| other.invariant_safety.cmp(&self.invariant_safety))
            .then_with(|| self.id.cmp(&other.id))
    }
}
