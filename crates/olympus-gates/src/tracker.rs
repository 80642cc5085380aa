// crates/olympus-gates/src/tracker.rs
// ============================================================================
// Module: Shape Mortality Tracker
// Description: Per-shape historical survival tracking, folded from the
// append-only mortality ledger.
// Purpose: Turn a shape's run history into a live MortalityRecord/Status the
// gates below can consult without re-deriving it from raw trace data.
// Dependencies: olympus_core::{mortality, tier}, olympus_ledger::MortalityLedger
// ============================================================================

//! ## Overview
//! Per §9 "Mortality DB keyed by shape id": this is a materialized view over
//! a fold of run-end events, not a mutable map. [`ShapeMortalityTracker`]
//! rebuilds its in-memory index from the ledger's append-only history on
//! open, then appends — never rewrites — a new record each time a shape is
//! observed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use olympus_core::classify;
use olympus_core::LedgerBackend;
use olympus_core::MortalityRecord;
use olympus_core::MortalityStatus;
use olympus_core::Shape;
use olympus_core::ShapeId;
use olympus_core::ShapeTraceResult;
use olympus_ledger::MortalityLedger;

// ============================================================================
// SECTION: Survival Determination
// ============================================================================

/// Determines whether a shape "survived" a run for mortality-tracking
/// purposes: an invariant shape must reach the target with zero loss; any
/// other shape must meet its tier's RSR law (§3 "Mortality record").
#[must_use]
pub fn survived(shape: &Shape, trace: &ShapeTraceResult) -> bool {
    if shape.is_invariant() {
        return trace.survival_status.survived_to_target && !trace.has_any_loss();
    }
    olympus_core::tier::tier_met(
        shape.criticality,
        trace.overall_rsr,
        &trace
            .handoff_diffs
            .iter()
            .filter_map(|diff| diff.loss_class)
            .collect::<Vec<_>>(),
    )
}

// ============================================================================
// SECTION: Tracker
// ============================================================================

/// A live, ledger-backed index of every shape's mortality record.
pub struct ShapeMortalityTracker {
    ledger: MortalityLedger,
    index: BTreeMap<ShapeId, MortalityRecord>,
}

impl ShapeMortalityTracker {
    /// Opens the mortality ledger at `path` and rebuilds the in-memory
    /// index by folding over its full history, last record per shape wins.
    ///
    /// # Errors
    /// Returns [`olympus_core::LedgerError`] if the ledger cannot be opened
    /// or read.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, olympus_core::LedgerError> {
        let ledger = MortalityLedger::open(path)?;
        let mut index = BTreeMap::new();
        for entry in ledger.entries()? {
            index.insert(entry.payload.shape_id.clone(), entry.payload);
        }
        Ok(Self { ledger, index })
    }

    /// Returns the current record for `shape_id`, if it has ever been
    /// observed.
    #[must_use]
    pub fn record_for(&self, shape_id: &ShapeId) -> Option<&MortalityRecord> {
        self.index.get(shape_id)
    }

    /// Returns the current mortality status for `shape_id`, defaulting to
    /// [`MortalityStatus::Healthy`] for a shape never yet observed.
    #[must_use]
    pub fn status_for(&self, shape_id: &ShapeId) -> MortalityStatus {
        self.index.get(shape_id).map_or(MortalityStatus::Healthy, classify)
    }

    /// Folds one run's outcome for `shape` into its mortality record and
    /// appends the updated record to the ledger.
    ///
    /// # Errors
    /// Returns [`olympus_core::LedgerError`] if the append fails.
    pub fn observe(
        &mut self,
        shape: &Shape,
        trace: &ShapeTraceResult,
    ) -> Result<MortalityRecord, olympus_core::LedgerError> {
        let previous = self
            .index
            .get(&shape.id)
            .cloned()
            .unwrap_or_else(|| MortalityRecord::new(shape.id.clone()));
        let updated = previous.observe(survived(shape, trace), trace.overall_rsr);
        self.ledger.append(updated.clone())?;
        self.index.insert(shape.id.clone(), updated.clone());
        Ok(updated)
    }
}
