// crates/olympus-ledger/tests/jsonl_generic.rs
// ============================================================================
// Module: Generic JSONL Ledger Tests
// Description: Append, load, verify, and tamper-detection behavior of
// JsonlLedger<T> independent of any named ledger's payload type.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::fs;
use std::io::Write;

use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_ledger::JsonlLedger;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Sample {
    value: u64,
}

#[test]
fn append_assigns_monotonic_indices_and_chains_hashes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");
    let mut ledger: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("opens");

    let first = ledger.append(Sample { value: 1 }).expect("appends");
    let second = ledger.append(Sample { value: 2 }).expect("appends");

    assert_eq!(first.index.get(), 0);
    assert_eq!(second.index.get(), 1);
    assert_eq!(first.previous_entry_hash, None);
    assert_eq!(second.previous_entry_hash, Some(first.entry_hash.clone()));
    assert_ne!(first.entry_hash, second.entry_hash);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn reopening_an_existing_ledger_rehydrates_next_index_and_tip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");

    {
        let mut ledger: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("opens");
        ledger.append(Sample { value: 1 }).expect("appends");
        ledger.append(Sample { value: 2 }).expect("appends");
    }

    let mut reopened: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("reopens");
    assert_eq!(reopened.len(), 2);
    let third = reopened.append(Sample { value: 3 }).expect("appends");
    assert_eq!(third.index.get(), 2);
}

#[test]
fn verify_passes_on_an_untampered_chain() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");
    let mut ledger: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("opens");
    ledger.append(Sample { value: 1 }).expect("appends");
    ledger.append(Sample { value: 2 }).expect("appends");
    ledger.append(Sample { value: 3 }).expect("appends");

    let report = ledger.verify().expect("verifies");
    assert!(report.ok);
    assert_eq!(report.first_break_index, None);
}

#[test]
fn verify_detects_a_rewritten_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");
    let mut ledger: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("opens");
    ledger.append(Sample { value: 1 }).expect("appends");
    ledger.append(Sample { value: 2 }).expect("appends");

    let contents = fs::read_to_string(&path).expect("reads");
    let tampered = contents.replace("\"value\":2", "\"value\":99");
    assert_ne!(contents, tampered);
    fs::write(&path, tampered).expect("writes");

    let report = ledger.verify().expect("verifies");
    assert!(!report.ok);
    assert_eq!(report.first_break_index.map(olympus_core::LedgerIndex::get), Some(1));
}

#[test]
fn verify_detects_a_skipped_index() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");
    let mut ledger: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("opens");
    ledger.append(Sample { value: 1 }).expect("appends");

    let mut file = fs::OpenOptions::new().append(true).open(&path).expect("opens for append");
    writeln!(
        file,
        "{{\"index\":5,\"previous_entry_hash\":null,\"entry_hash\":\"0000000000000000\",\"payload\":{{\"value\":7}}}}"
    )
    .expect("writes");
    drop(file);

    let report = ledger.verify().expect("verifies");
    assert!(!report.ok);
    assert_eq!(report.first_break_index.map(olympus_core::LedgerIndex::get), Some(1));
}

#[test]
fn load_rejects_malformed_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");
    fs::write(&path, "not json\n").expect("writes");

    let result: Result<JsonlLedger<Sample>, LedgerError> = JsonlLedger::new(&path);
    assert!(matches!(result, Err(LedgerError::Malformed { .. })));
}

#[test]
fn empty_ledger_is_empty_and_verifies_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sample.jsonl");
    let ledger: JsonlLedger<Sample> = JsonlLedger::new(&path).expect("opens");
    assert!(ledger.is_empty());
    assert_eq!(ledger.len(), 0);
    let report = ledger.verify().expect("verifies");
    assert!(report.ok);
}
