// crates/olympus-core/src/core/manifest.rs
// ============================================================================
// Module: OLYMPUS Run Manifest
// Description: Per-run record of which ledgers were touched and at what index.
// Purpose: Complete §3's ownership model with a queryable per-run summary.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! **Supplement**: §3 states that every persistent record is owned by
//! exactly one of twelve append-only databases, but does not name a type
//! that reports, for a single run, which of those databases it touched.
//! `original_source/` retained zero files for this distillation (see
//! `_INDEX.md`), so this is not mined from an original implementation — it
//! is a direct completion of §3's ownership model, built in the same
//! struct/doc-comment idiom as the rest of this module.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::LedgerIndex;
use crate::core::identifiers::RunId;

// ============================================================================
// SECTION: Ledger Name
// ============================================================================

/// The name of one of the twelve ledgers a run may touch (§6 "Persisted
/// state").
///
/// # Invariants
/// - Variants are stable for serialization; this is the external contract
///   naming the files listed in §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerName {
    /// `mortality.json`
    Mortality,
    /// `fingerprints/<run>/`
    FingerprintIndex,
    /// `inevitability-history.json`
    InevitabilityHistory,
    /// `necessity.json`
    Necessity,
    /// `intent-cones.json`
    IntentCones,
    /// `cin.json`
    Cin,
    /// `singularity.json`
    Singularity,
    /// `entropy.json`
    Entropy,
    /// `contracts.json`
    Contracts,
    /// `tsl.json`
    Tsl,
    /// `proof-ledger.jsonl`
    ProofLedger,
    /// `attestation-log.jsonl`
    AttestationLog,
    /// `obligation-ledger.jsonl`
    ObligationLedger,
}

// ============================================================================
// SECTION: Run Manifest
// ============================================================================

/// A single ledger touched by a run, and the index it occupied there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTouch {
    /// The ledger touched.
    pub ledger: LedgerName,
    /// The index the appended entry occupies in that ledger.
    pub index: LedgerIndex,
}

/// A per-run summary of which ledgers were appended to and at what index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OlympusRunManifest {
    /// The run this manifest describes.
    pub run_id: RunId,
    /// Every ledger touch this run performed, in append order.
    pub touches: Vec<LedgerTouch>,
}

impl OlympusRunManifest {
    /// Creates an empty manifest for a run.
    #[must_use]
    pub const fn new(run_id: RunId) -> Self {
        Self { run_id, touches: Vec::new() }
    }

    /// Records a ledger touch.
    pub fn record(&mut self, ledger: LedgerName, index: LedgerIndex) {
        self.touches.push(LedgerTouch { ledger, index });
    }

    /// Returns the index recorded for `ledger`, if this run touched it.
    #[must_use]
    pub fn index_for(&self, ledger: LedgerName) -> Option<LedgerIndex> {
        self.touches.iter().find(|touch| touch.ledger == ledger).map(|touch| touch.index)
    }
}
