// crates/olympus-gates/src/gates/oris.rs
// ============================================================================
// Module: Ontological Rigidity Invariant System (ORIS)
// Description: Fifth gate; checks a shape's observed RSR and tolerated loss
// classes against its criticality tier's immutable law.
// Purpose: Enforce §4.3's tier law table as the hard floor every shape must
// clear, independent of any intervention OCIC composed.
// Dependencies: olympus_core::tier, olympus_core::shape
// ============================================================================

//! ## Overview
//! §4.3: every shape belongs to exactly one [`Criticality`] tier, and each
//! tier has a fixed minimum RSR, a fixed set of tolerated loss classes, and
//! a fixed violation action. An invariant shape (`Shape::is_invariant`)
//! additionally never tolerates failing to survive to the target stage or
//! losing any attribute at all, regardless of tier — this rule sits above
//! the tier table and is checked first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::tier::law_for;
use olympus_core::tier::tier_met;
use olympus_core::tier::ViolationAction;
use olympus_core::Shape;
use olympus_core::ShapeTraceResult;

/// ORIS's verdict for one shape's trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrisOutcome {
    /// The shape's tier law is satisfied.
    Compliant,
    /// The shape is an invariant shape and lost an attribute; always fatal,
    /// regardless of tier.
    InvariantViolated,
    /// The shape's tier law was violated and the tier's action is
    /// `BLOCK_ALL`.
    Blocked,
    /// The shape's tier law was violated and the tier's action is
    /// `FORK_TTE`: the run forks into Triple-Track Execution rather than
    /// failing outright.
    Forked,
    /// The shape's tier law was violated and the tier's action is
    /// `WARN_ONLY`: the run continues with a recorded warning.
    Warned,
}

impl OrisOutcome {
    /// Returns `true` if this outcome permits the run to continue past
    /// ORIS without an IE-style veto.
    #[must_use]
    pub const fn permits_continuation(self) -> bool {
        !matches!(self, Self::InvariantViolated | Self::Blocked)
    }
}

/// Checks one shape's trace against its tier law.
#[must_use]
pub fn evaluate(shape: &Shape, trace: &ShapeTraceResult) -> OrisOutcome {
    let span = tracing::info_span!("oris.evaluate", shape_id = %shape.id);
    let _guard = span.enter();

    if shape.is_invariant() && (!trace.survival_status.survived_to_target || trace.has_any_loss()) {
        tracing::warn!(shape_id = %shape.id, "invariant shape failed to survive to target or lost an attribute");
        return OrisOutcome::InvariantViolated;
    }

    let losses: Vec<_> = trace.handoff_diffs.iter().filter_map(|diff| diff.loss_class).collect();
    if tier_met(shape.criticality, trace.overall_rsr, &losses) {
        return OrisOutcome::Compliant;
    }

    let law = law_for(shape.criticality);
    tracing::warn!(
        shape_id = %shape.id,
        rsr = trace.overall_rsr,
        min_rsr = law.min_rsr,
        action = ?law.violation_action,
        "tier law violated"
    );
    match law.violation_action {
        ViolationAction::BlockAll => OrisOutcome::Blocked,
        ViolationAction::ForkTte => OrisOutcome::Forked,
        ViolationAction::WarnOnly => OrisOutcome::Warned,
    }
}
