// crates/olympus-core/src/core/action.rs
// ============================================================================
// Module: OLYMPUS Action Signature
// Description: Attempted actions and their structural fingerprint.
// Purpose: Give every attempted action a stable, content-addressed identity.
// Dependencies: crate::core::{fingerprint, identifiers}, serde
// ============================================================================

//! ## Overview
//! Implements §3 "Action signature": a structural fingerprint over
//! `(affected_shapes, affected_handoffs, transform_types,
//! change_directions)`, computed exactly once per attempt and immutable
//! thereafter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::fingerprint::fingerprint;
use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::FingerprintSerializationError;
use crate::core::identifiers::ActionId;
use crate::core::identifiers::HandoffId;
use crate::core::identifiers::ShapeId;

// ============================================================================
// SECTION: Attempted Action
// ============================================================================

/// The kind of operation an attempted action performs.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Read-only inspection of existing shapes.
    Read,
    /// Creation of a new shape or handoff.
    Create,
    /// In-place update of an existing shape.
    Update,
    /// Structural transformation crossing one or more handoffs.
    Transform,
    /// Removal of a shape or handoff.
    Delete,
}

/// The direction of change an action applies to a shape.
///
/// # Invariants
/// - Order-independent as a set member — collected into a `BTreeSet` so
///   the set serializes pre-sorted for fingerprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    /// An attribute or shape is being added.
    Add,
    /// An attribute or shape is being removed.
    Remove,
    /// An attribute or shape is being modified in place.
    Modify,
}

/// An action submitted to the pipeline for evaluation (§6 input).
///
/// # Invariants
/// - `action_id` is unique per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptedAction {
    /// Unique identifier for this attempt.
    pub action_id: ActionId,
    /// The kind of operation attempted.
    pub action_type: ActionType,
    /// Free-text description of the action, not itself fingerprinted.
    pub description: String,
    /// Shapes this action affects.
    pub affected_shapes: BTreeSet<ShapeId>,
    /// Handoffs this action affects.
    pub affected_handoffs: BTreeSet<HandoffId>,
    /// Named transform kinds this action applies (source-agent defined,
    /// opaque strings from OLYMPUS's perspective).
    pub transform_types: BTreeSet<String>,
    /// Directions of change this action applies to its affected shapes.
    pub change_directions: BTreeSet<ChangeDirection>,
}

// ============================================================================
// SECTION: Action Signature
// ============================================================================

/// The structural fingerprint over an action's affected shapes, handoffs,
/// transform types, and change directions.
///
/// # Invariants
/// - Computed exactly once per attempt via [`ActionSignature::compute`];
///   immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSignature {
    /// Shapes this action affects, pre-sorted.
    pub affected_shapes: BTreeSet<ShapeId>,
    /// Handoffs this action affects, pre-sorted.
    pub affected_handoffs: BTreeSet<HandoffId>,
    /// Transform types this action applies, pre-sorted.
    pub transform_types: BTreeSet<String>,
    /// Change directions this action applies, pre-sorted.
    pub change_directions: BTreeSet<ChangeDirection>,
    /// The resulting structural fingerprint.
    pub fingerprint: Fingerprint,
}

impl ActionSignature {
    /// Computes the structural fingerprint of an attempted action.
    ///
    /// # Errors
    /// Returns [`FingerprintSerializationError`] only if the action's
    /// structural fields cannot be serialized.
    pub fn compute(
        action: &AttemptedAction,
    ) -> Result<Self, FingerprintSerializationError> {
        #[derive(Serialize)]
        struct Structural<'a> {
            affected_shapes: &'a BTreeSet<ShapeId>,
            affected_handoffs: &'a BTreeSet<HandoffId>,
            transform_types: &'a BTreeSet<String>,
            change_directions: &'a BTreeSet<ChangeDirection>,
        }

        let structural = Structural {
            affected_shapes: &action.affected_shapes,
            affected_handoffs: &action.affected_handoffs,
            transform_types: &action.transform_types,
            change_directions: &action.change_directions,
        };
        let fp = fingerprint(&structural)?;

        Ok(Self {
            affected_shapes: action.affected_shapes.clone(),
            affected_handoffs: action.affected_handoffs.clone(),
            transform_types: action.transform_types.clone(),
            change_directions: action.change_directions.clone(),
            fingerprint: fp,
        })
    }
}
