// crates/olympus-ledger/src/lib.rs
// ============================================================================
// Crate: olympus-ledger
// Description: JSONL-backed, hash-chained implementation of
// olympus_core::LedgerBackend, plus the thirteen named ledgers every gate
// appends to.
// Purpose: Durable storage layer for the OLYMPUS runtime governance engine.
// ============================================================================

//! ## Overview
//! `olympus-ledger` has exactly one job: make every append-only database
//! named in §6 durable, hash-chained, and fail-closed on corruption. It
//! knows nothing about gate logic (that lives in `olympus-gates`) and
//! exposes no mutation path for an already-appended entry.

pub mod jsonl;
pub mod ledgers;
pub mod payloads;

pub use jsonl::JsonlLedger;
pub use ledgers::AttestationLog;
pub use ledgers::CinLedger;
pub use ledgers::ContractLedger;
pub use ledgers::EntropyLedger;
pub use ledgers::FingerprintIndex;
pub use ledgers::InevitabilityLedger;
pub use ledgers::IntentConeLedger;
pub use ledgers::MortalityLedger;
pub use ledgers::NecessityLedger;
pub use ledgers::ObligationLedger;
pub use ledgers::ProofLedger;
pub use ledgers::SingularityLedger;
pub use ledgers::TslLedger;
pub use payloads::FingerprintIndexEntry;
pub use payloads::InevitabilityRecord;
pub use payloads::IntentConeRecord;
