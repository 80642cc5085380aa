// crates/olympus-core/src/core/shape.rs
// ============================================================================
// Module: OLYMPUS Shape Declarations
// Description: Shape, criticality, and kind declarations carried through the pipeline.
// Purpose: Declare the units the agent pipeline must preserve end to end.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A shape is a unit of meaning (a requirement, a constraint, a piece of
//! context) that must survive the handoffs between pipeline stages. Shapes
//! are declared once per project and referenced by id from trace results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ShapeId;

// ============================================================================
// SECTION: Shape Kind and Criticality
// ============================================================================

/// Whether a shape is a hard invariant or an ordinary capability.
///
/// # Invariants
/// - An `Invariant` shape with any attribute loss is always a fatal
///   violation, regardless of `Criticality` (see [`Shape`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Loss of any required attribute is fatal, independent of tier.
    Invariant,
    /// Loss is governed by the tier law table (see `crate::core::tier`).
    Capability,
}

/// The tier a shape belongs to for RSR enforcement purposes.
///
/// # Invariants
/// - Variants are ordered from strictest to most lenient minimum RSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    /// Must not lose any required attribute. `min_rsr = 1.00`.
    Foundational,
    /// May tolerate a bounded set of loss classes. `min_rsr = 0.95`.
    Interactive,
    /// May tolerate a wider set of loss classes. `min_rsr = 0.80`.
    Enhancement,
}

// ============================================================================
// SECTION: Shape Declaration
// ============================================================================

/// A declared shape that the agent pipeline must preserve.
///
/// # Invariants
/// - `required_attributes` is never empty; a shape with no required
///   attributes is not meaningfully trackable.
/// - `required_attributes` and `optional_attributes` are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape identifier.
    pub id: ShapeId,
    /// Whether this shape is a hard invariant or an ordinary capability.
    pub kind: ShapeKind,
    /// Enforcement tier for RSR purposes.
    pub criticality: Criticality,
    /// Attribute names that must be present at the target stage.
    pub required_attributes: BTreeSet<String>,
    /// Attribute names that may be present but are not enforced.
    pub optional_attributes: BTreeSet<String>,
    /// The shape this one was derived from, if any.
    ///
    /// **Supplement**: not named by the component's §3 description, which
    /// only lists `id`/`kind`/`criticality`/attribute sets; implied by the
    /// mortality and entropy discussion's need to relate shapes introduced
    /// by an intervention back to the shape they protect.
    pub lineage: Option<ShapeId>,
}

impl Shape {
    /// An invariant shape is fatal-on-loss regardless of criticality.
    #[must_use]
    pub const fn is_invariant(&self) -> bool {
        matches!(self.kind, ShapeKind::Invariant)
    }
}
