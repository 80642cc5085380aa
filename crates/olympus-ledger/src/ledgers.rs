// crates/olympus-ledger/src/ledgers.rs
// ============================================================================
// Module: Named Ledgers
// Description: The thirteen concrete, hash-chained JSONL ledgers every gate
// appends to.
// Purpose: Give each entry in olympus_core::LedgerName a typed, durable
// handle, instead of a raw JsonlLedger<T> callers must remember the payload
// type for.
// Dependencies: crate::jsonl, crate::payloads, olympus_core
// ============================================================================

//! ## Overview
//! Each named ledger here wraps a [`JsonlLedger`] over the payload type the
//! corresponding gate produces. The wrapper exists purely to give callers a
//! concrete, discoverable type (`MortalityLedger` rather than
//! `JsonlLedger<MortalityRecord>`) that matches the thirteen files named in
//! §6 ("Persisted state"). All thirteen implement the same
//! [`LedgerBackend`] trait olympus-core defines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use olympus_core::CausalFingerprintRecord;
use olympus_core::DecisionSingularity;
use olympus_core::EntropyBudget;
use olympus_core::EntropyState;
use olympus_core::Fingerprint;
use olympus_core::LedgerBackend;
use olympus_core::LedgerEntry;
use olympus_core::LedgerError;
use olympus_core::MortalityRecord;
use olympus_core::NecessaryFuture;
use olympus_core::Obligation;
use olympus_core::OlympusDecisionProof;
use olympus_core::TemporalContract;
use olympus_core::VerifyReport;

use crate::jsonl::JsonlLedger;
use crate::payloads::FingerprintIndexEntry;
use crate::payloads::InevitabilityRecord;
use crate::payloads::IntentConeRecord;

// ============================================================================
// SECTION: Named Ledger Macro
// ============================================================================

macro_rules! named_ledger {
    ($name:ident, $payload:ty, $doc:expr) => {
        #[doc = $doc]
        pub struct $name(JsonlLedger<$payload>);

        impl $name {
            #[doc = concat!(
                "Opens (creating if absent) the `", stringify!($name), "` backing file at `path`."
            )]
            ///
            /// # Errors
            /// Returns [`LedgerError`] if the path is invalid or the
            /// existing file cannot be read.
            pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
                Ok(Self(JsonlLedger::new(path)?))
            }

            /// Reads every entry currently on disk, in ledger order.
            ///
            /// # Errors
            /// Returns [`LedgerError`] if the backing file cannot be read.
            pub fn entries(&self) -> Result<Vec<LedgerEntry<$payload>>, LedgerError> {
                self.0.entries()
            }
        }

        impl LedgerBackend<$payload> for $name {
            fn load(&mut self) -> Result<(), LedgerError> {
                self.0.load()
            }

            fn append(&mut self, payload: $payload) -> Result<LedgerEntry<$payload>, LedgerError> {
                self.0.append(payload)
            }

            fn verify(&self) -> Result<VerifyReport, LedgerError> {
                self.0.verify()
            }

            fn len(&self) -> u64 {
                self.0.len()
            }
        }
    };
}

// ============================================================================
// SECTION: The Thirteen Named Ledgers
// ============================================================================

named_ledger!(
    MortalityLedger,
    MortalityRecord,
    "Per-shape survival history maintained by the Shape Mortality Tracker (`mortality.json`)."
);

named_ledger!(
    FingerprintIndex,
    FingerprintIndexEntry,
    "Fingerprint-to-originating-run index consulted by the Decision Singularity gate \
     (`fingerprints/<run>/`)."
);

named_ledger!(
    InevitabilityLedger,
    InevitabilityRecord,
    "Inevitability Engine verdict history, consulted by counterfactual replay \
     (`inevitability-history.json`)."
);

named_ledger!(
    NecessityLedger,
    NecessaryFuture,
    "Necessity Engine selections (`necessity.json`)."
);

named_ledger!(
    IntentConeLedger,
    IntentConeRecord,
    "Incoming Cone Evaluator verdicts (`intent-cones.json`)."
);

named_ledger!(
    CinLedger,
    CausalFingerprintRecord,
    "Causal Fingerprint Collector records (`cin.json`)."
);

named_ledger!(
    SingularityLedger,
    DecisionSingularity,
    "Declared decision singularities (`singularity.json`)."
);

named_ledger!(
    EntropyLedger,
    EntropyState,
    "Architectural Entropy Calculator history, one entry per run (`entropy.json`)."
);

named_ledger!(
    ContractLedger,
    TemporalContract,
    "Declared, immutable temporal contracts, one per project (`contracts.json`)."
);

named_ledger!(
    TslLedger,
    EntropyBudget,
    "Per-project entropy budget consumption log maintained by the Temporal Scarcity \
     Ledger (`tsl.json`)."
);

named_ledger!(
    ProofLedger,
    OlympusDecisionProof,
    "The canonical append-only log of every decision proof ever built (`proof-ledger.jsonl`)."
);

named_ledger!(
    AttestationLog,
    Fingerprint,
    "The chain of continuity hashes each proof was entangled with (`attestation-log.jsonl`)."
);

named_ledger!(
    ObligationLedger,
    Obligation,
    "Derived obligations and their lifecycle (`obligation-ledger.jsonl`)."
);
