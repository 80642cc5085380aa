// crates/olympus-core/src/core/tier.rs
// ============================================================================
// Module: OLYMPUS Tier Law Table
// Description: Compile-time RSR/tolerated-loss/violation-action constants.
// Purpose: Enforce §4.3's invariant laws table as immutable data, not
// user-facing configuration (spec §1, §9 Non-goals).
// Dependencies: crate::core::{shape, trace}
// ============================================================================

//! ## Overview
//! §6 states the invariant laws table is part of the external contract:
//! "changing it is a breaking change". It is therefore modeled as `const`
//! data here, never as a value `olympus-config` can load (see
//! `DESIGN.md`'s ambient-stack notes).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::shape::Criticality;
use crate::core::trace::LossClass;

// ============================================================================
// SECTION: Tier Law
// ============================================================================

/// The action a gate takes when a tier's law is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationAction {
    /// Block the entire run; no fork is offered.
    BlockAll,
    /// Fork into Triple-Track Execution (§4.3).
    ForkTte,
    /// Record a warning only; does not block.
    WarnOnly,
}

/// One row of the tier law table.
#[derive(Debug, Clone, Copy)]
pub struct TierLaw {
    /// The criticality tier this law governs.
    pub criticality: Criticality,
    /// Minimum RSR a shape at this tier must maintain.
    pub min_rsr: f64,
    /// Loss classes tolerated at this tier without violating its law.
    pub tolerated_losses: &'static [LossClass],
    /// The action taken when this tier's law is violated.
    pub violation_action: ViolationAction,
}

/// The compile-time tier law table (§4.3). Order matches `Criticality`'s
/// declared variant order.
pub const TIER_LAWS: [TierLaw; 3] = [
    TierLaw {
        criticality: Criticality::Foundational,
        min_rsr: 1.00,
        tolerated_losses: &[],
        violation_action: ViolationAction::BlockAll,
    },
    TierLaw {
        criticality: Criticality::Interactive,
        min_rsr: 0.95,
        tolerated_losses: &[LossClass::L3SpecificityLoss],
        violation_action: ViolationAction::ForkTte,
    },
    TierLaw {
        criticality: Criticality::Enhancement,
        min_rsr: 0.80,
        tolerated_losses: &[LossClass::L3SpecificityLoss, LossClass::L7SchemaMismatch],
        violation_action: ViolationAction::WarnOnly,
    },
];

/// Looks up the tier law for a criticality.
#[must_use]
pub fn law_for(criticality: Criticality) -> &'static TierLaw {
    TIER_LAWS
        .iter()
        .find(|law| law.criticality == criticality)
        .unwrap_or(&TIER_LAWS[0])
}

/// Computes a shape's RSR: `attributes_present_at_target /
/// attributes_required`.
#[must_use]
pub fn rsr(attributes_present: usize, attributes_required: usize) -> f64 {
    if attributes_required == 0 {
        return 1.0;
    }
    attributes_present as f64 / attributes_required as f64
}

/// Returns `true` if a shape's RSR and observed loss classes satisfy its
/// tier's law (ignoring the separate, always-fatal invariant-shape rule —
/// see `crate::core::shape::Shape::is_invariant`).
#[must_use]
pub fn tier_met(criticality: Criticality, shape_rsr: f64, losses: &[LossClass]) -> bool {
    let law = law_for(criticality);
    if shape_rsr < law.min_rsr {
        return false;
    }
    losses.iter().all(|loss| law.tolerated_losses.contains(loss))
}
