// crates/olympus-gates/src/inspector.rs
// ============================================================================
// Module: Adaptive Inspector
// Description: Pure mapping from mortality status to required inspection depth.
// Purpose: Let downstream gates scale scrutiny to a shape's track record.
// Dependencies: olympus_core::MortalityStatus
// ============================================================================

//! ## Overview
//! A pure, total function: `MortalityStatus -> InspectionDepth`. No ledger
//! access, no side effects — every other gate that wants to know how hard to
//! look at a shape calls [`depth_for`] rather than re-deriving the mapping.

use olympus_core::MortalityStatus;

/// How closely a shape's handoffs should be scrutinized this run.
///
/// # Invariants
/// - Ordered `Minimal < Standard < Deep < Exhaustive`; higher depth never
///   means less scrutiny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InspectionDepth {
    /// A healthy shape: spot-check only.
    Minimal,
    /// A flaky shape: standard per-handoff inspection.
    Standard,
    /// A systemically broken shape: every handoff diff is inspected.
    Deep,
    /// A degrading shape: every handoff diff plus trend history is
    /// inspected, regardless of its absolute survival rate.
    Exhaustive,
}

/// Maps a mortality status to its required inspection depth.
///
/// Declining trend — `Degrading` — always maps to the deepest level: a
/// shape actively getting worse deserves more scrutiny than one that is
/// merely below a fixed threshold.
#[must_use]
pub const fn depth_for(status: MortalityStatus) -> InspectionDepth {
    match status {
        MortalityStatus::Healthy => InspectionDepth::Minimal,
        MortalityStatus::Flaky => InspectionDepth::Standard,
        MortalityStatus::SystemicallyBroken => InspectionDepth::Deep,
        MortalityStatus::Degrading => InspectionDepth::Exhaustive,
    }
}
