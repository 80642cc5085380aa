// crates/olympus-gates/src/gates/cin.rs
// ============================================================================
// Module: Canonical Intent Normalisation (CIN)
// Description: Eighth gate; reduces every ALIGNED intent to a Minimal
// Structural Intent and rewrites later equivalents to their first canonical
// form.
// Purpose: Collapse narratively-distinct but structurally-identical intents
// into one equivalence class before TSL spends budget on them.
// Dependencies: olympus_core::{action, fingerprint}, crate::gates::ice
// ============================================================================

//! ## Overview
//! §4.11: strips free-text narrative from an aligned intent, sorts and
//! deduplicates its shape and handoff sets, orders its operations by causal
//! dependency (`READ < CREATE < UPDATE < TRANSFORM`; `DELETE` never reaches
//! CIN, ICE rejects it as `CONTRADICTORY`), and singularises its outcome by
//! last-wins among `PRESERVE`/`MODIFY`/`RESTORE` as implied by the MCCS
//! target's intervention type. Two MSIs with identical canonical
//! fingerprints belong to the same equivalence class: the first one CIN
//! sees wins, and every later equivalent is rewritten to reference it
//! instead of being treated as a new intent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use olympus_core::fingerprint;
use olympus_core::ActionType;
use olympus_core::AttemptedAction;
use olympus_core::Fingerprint;
use olympus_core::FingerprintSerializationError;
use olympus_core::HandoffId;
use olympus_core::IntentId;
use olympus_core::ShapeId;
use serde::Serialize;

use crate::gates::ice::IntentClass;
use crate::gates::ice::IncomingIntent;

/// The causal ordering CIN sorts operations by (§4.11).
#[must_use]
const fn causal_rank(action_type: ActionType) -> u8 {
    match action_type {
        ActionType::Read => 0,
        ActionType::Create => 1,
        ActionType::Update => 2,
        ActionType::Transform => 3,
        ActionType::Delete => 4,
    }
}

/// The canonical, narrative-free reduction of one aligned intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinimalStructuralIntent {
    /// Shapes affected, sorted and deduplicated.
    pub shapes: BTreeSet<ShapeId>,
    /// Handoffs affected, sorted and deduplicated.
    pub handoffs: BTreeSet<HandoffId>,
    /// The operation, reduced to its causal-ordering rank.
    pub operation_rank: u8,
}

/// A canonicalized intent plus the content hash identifying its equivalence
/// class.
#[derive(Debug, Clone)]
pub struct CanonicalIntent {
    /// The reduced structural intent.
    pub msi: MinimalStructuralIntent,
    /// Content hash of `msi`; intents sharing this fingerprint are
    /// structurally identical.
    pub canonical_fingerprint: Fingerprint,
}

/// Reduces one aligned intent to its [`MinimalStructuralIntent`] and
/// computes its canonical fingerprint.
///
/// # Errors
/// Returns [`FingerprintSerializationError`] only if the reduced intent
/// cannot be serialized.
pub fn canonicalize(action: &AttemptedAction) -> Result<CanonicalIntent, FingerprintSerializationError> {
    let msi = MinimalStructuralIntent {
        shapes: action.affected_shapes.clone(),
        handoffs: action.affected_handoffs.clone(),
        operation_rank: causal_rank(action.action_type),
    };
    let canonical_fingerprint = fingerprint(&msi)?;
    Ok(CanonicalIntent { msi, canonical_fingerprint })
}

/// An equivalence index: canonical fingerprint to the first intent id that
/// produced it. Rebuilt on load from ICE's persisted ALIGNED verdicts
/// (§9 "derived in-memory caches ... rebuilt on load from the append-only
/// source of truth") — CIN itself persists no ledger of its own.
#[derive(Debug, Default)]
pub struct EquivalenceIndex {
    first_seen: BTreeMap<Fingerprint, IntentId>,
}

impl EquivalenceIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalises one ALIGNED intent, returning the canonical intent id it
    /// should be treated as from here on: either its own id (first of its
    /// class) or the id of the equivalence class's first member.
    ///
    /// # Errors
    /// Returns [`FingerprintSerializationError`] only if the intent cannot
    /// be reduced to structural form.
    pub fn normalize(
        &mut self,
        intent: &IncomingIntent,
        class: IntentClass,
    ) -> Result<Option<IntentId>, FingerprintSerializationError> {
        if class != IntentClass::Aligned {
            return Ok(None);
        }
        let canonical = canonicalize(&intent.action)?;
        let representative = self
            .first_seen
            .entry(canonical.canonical_fingerprint.clone())
            .or_insert_with(|| intent.intent_id.clone());
        if representative != &intent.intent_id {
            tracing::info!(
                intent_id = %intent.intent_id,
                representative = %representative,
                "intent rewritten to its equivalence class representative"
            );
        }
        Ok(Some(representative.clone()))
    }
}
