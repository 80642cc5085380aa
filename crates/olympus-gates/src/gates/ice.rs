// crates/olympus-gates/src/gates/ice.rs
// ============================================================================
// Module: Intent Collapse (ICE)
// Description: Seventh gate; derives a causal cone from the necessary future
// and classifies every incoming intent against it.
// Purpose: Reject any submitted intent that cannot causally precede the
// selected necessary future.
// Dependencies: olympus_core::{action, necessity}, olympus_ledger::IntentConeLedger
// ============================================================================

//! ## Overview
//! §4.10: from a [`NecessaryFuture`], ICE builds a causal cone — an
//! allowlist of action signatures that may causally precede it (a `READ`
//! over a preserved shape is always allowed; a `RESTORE`-classified
//! transform over an intervention target is allowed) and an exclusion set
//! (`DELETE`/`DESTROY` is always forbidden, as is any handoff break the
//! future requires). Every incoming intent is classified deterministically;
//! only [`IntentClass::Aligned`] intents proceed to CIN.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use olympus_core::ActionId;
use olympus_core::ActionType;
use olympus_core::AttemptedAction;
use olympus_core::HandoffId;
use olympus_core::IntentId;
use olympus_core::NecessaryFuture;
use olympus_core::ShapeId;

/// One incoming intent submitted for evaluation against the current
/// necessary future's causal cone (§6 "Optional incoming intents for ICE").
#[derive(Debug, Clone)]
pub struct IncomingIntent {
    /// Identifier for this intent.
    pub intent_id: IntentId,
    /// The action this intent proposes.
    pub action: AttemptedAction,
}

/// The causal cone derived from a necessary future: what may, and may
/// never, causally precede it.
#[derive(Debug, Clone)]
pub struct CausalCone {
    /// Shapes the future's cut set targets; a `Restore`-classified
    /// transform over one of these is always allowed.
    pub intervention_targets: BTreeSet<ShapeId>,
    /// Shapes the future requires to stay structurally intact; a `Read`
    /// over one of these is always allowed.
    pub preserved_shapes: BTreeSet<ShapeId>,
    /// Handoffs the future requires to remain unbroken; any intent
    /// breaking one of these is forbidden outright.
    pub protected_handoffs: BTreeSet<HandoffId>,
}

impl CausalCone {
    /// Derives a causal cone from a necessary future and the shapes it
    /// preserves end to end.
    #[must_use]
    pub fn derive(future: &NecessaryFuture, preserved_shapes: BTreeSet<ShapeId>) -> Self {
        let intervention_targets =
            future.mccs.interventions.iter().map(|i| i.target_shape.clone()).collect();
        let protected_handoffs =
            future.mccs.interventions.iter().map(|i| i.target_handoff).collect();
        Self { intervention_targets, preserved_shapes, protected_handoffs }
    }
}

/// The deterministic classification ICE assigns to an incoming intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentClass {
    /// The intent lies on the causal cone; it may proceed.
    Aligned,
    /// The intent neither helps nor harms the future; it is simply
    /// unrelated to the cone.
    NonCausal,
    /// The intent breaks a handoff or shape the future requires intact.
    Contradictory,
    /// The intent duplicates an already-allowed cone member.
    Redundant,
}

/// ICE's verdict for one incoming intent.
#[derive(Debug, Clone)]
pub struct IceVerdict {
    /// The intent this verdict covers.
    pub intent_id: IntentId,
    /// The assigned classification.
    pub class: IntentClass,
    /// Present only for non-`Aligned` verdicts: the specific causal
    /// requirement the intent violated or failed to satisfy.
    pub rejection_trace: Option<String>,
}

/// Classifies one incoming intent against a derived causal cone.
#[must_use]
pub fn classify(cone: &CausalCone, intent: &IncomingIntent, already_allowed: &[ActionId]) -> IceVerdict {
    let span = tracing::info_span!("ice.classify", intent_id = %intent.intent_id);
    let _guard = span.enter();

    let action = &intent.action;
    let breaks_protected_handoff =
        action.affected_handoffs.iter().any(|h| cone.protected_handoffs.contains(h));
    let destroys = matches!(action.action_type, ActionType::Delete);

    let class = if destroys || breaks_protected_handoff {
        IntentClass::Contradictory
    } else if already_allowed.contains(&action.action_id) {
        IntentClass::Redundant
    } else if matches!(action.action_type, ActionType::Read)
        && action.affected_shapes.is_subset(&cone.preserved_shapes)
    {
        IntentClass::Aligned
    } else if matches!(action.action_type, ActionType::Transform)
        && action.affected_shapes.iter().any(|shape| cone.intervention_targets.contains(shape))
    {
        IntentClass::Aligned
    } else {
        IntentClass::NonCausal
    };

    let rejection_trace = match class {
        IntentClass::Aligned => None,
        IntentClass::Contradictory if destroys => {
            Some("DELETE/DESTROY actions are always excluded from the causal cone".to_string())
        }
        IntentClass::Contradictory => {
            Some("action breaks a handoff the necessary future requires intact".to_string())
        }
        IntentClass::Redundant => Some("action duplicates an already-allowed cone member".to_string()),
        IntentClass::NonCausal => {
            Some("action does not causally precede the necessary future".to_string())
        }
    };

    if !matches!(class, IntentClass::Aligned) {
        tracing::warn!(intent_id = %intent.intent_id, ?class, "intent rejected by causal cone");
    }

    IceVerdict { intent_id: intent.intent_id.clone(), class, rejection_trace }
}
