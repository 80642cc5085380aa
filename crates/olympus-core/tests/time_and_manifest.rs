// crates/olympus-core/tests/time_and_manifest.rs
// ============================================================================
// Module: Timestamp and Run Manifest Tests
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use olympus_core::LedgerIndex;
use olympus_core::LedgerName;
use olympus_core::OlympusRunManifest;
use olympus_core::RunId;
use olympus_core::Timestamp;

#[test]
fn unix_millis_round_trips() {
    let ts = Timestamp::UnixMillis(1_700_000_000_000);
    assert_eq!(ts.as_unix_millis(), Some(1_700_000_000_000));
    assert_eq!(ts.as_logical(), None);
}

#[test]
fn logical_round_trips() {
    let ts = Timestamp::Logical(42);
    assert_eq!(ts.as_logical(), Some(42));
    assert_eq!(ts.as_unix_millis(), None);
}

#[test]
fn manifest_records_and_looks_up_ledger_touches() {
    let mut manifest = OlympusRunManifest::new(RunId::new("run-1"));
    manifest.record(LedgerName::Entropy, LedgerIndex::new(3));
    manifest.record(LedgerName::ProofLedger, LedgerIndex::new(7));
    assert_eq!(manifest.index_for(LedgerName::Entropy), Some(LedgerIndex::new(3)));
    assert_eq!(manifest.index_for(LedgerName::ProofLedger), Some(LedgerIndex::new(7)));
    assert_eq!(manifest.index_for(LedgerName::Tsl), None);
}

#[test]
fn manifest_starts_with_no_touches() {
    let manifest = OlympusRunManifest::new(RunId::new("run-1"));
    assert!(manifest.touches.is_empty());
}
