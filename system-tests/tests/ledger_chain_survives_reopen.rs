// system-tests/tests/ledger_chain_survives_reopen.rs
// ============================================================================
// Module: Cross-Run Hash Chain Integrity
// Description: Confirms the proof ledger's hash chain still verifies after
// several runs split across separate process lifetimes reopening the same
// durable file.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use olympus_core::Decision;
use olympus_core::LedgerBackend;
use olympus_gates::pipeline::run;
use system_tests::harness;
use system_tests::harness::Harness;

#[test]
fn three_runs_across_three_reopens_form_one_unbroken_chain() {
    let dir = tempfile::tempdir().expect("tempdir");

    for (index, action_id) in ["act-1", "act-2", "act-3"].iter().enumerate() {
        let mut process = Harness::open(dir.path()).expect("reopens durable ledgers");
        let step = u64::try_from(index).expect("small index fits u64") + 1;
        let inputs = harness::base_inputs(action_id, step);
        let outcome = run(inputs, &mut process.ledgers()).expect("pipeline runs");
        assert_eq!(outcome.proof.final_decision, Decision::Allow);
    }

    let mut final_process = Harness::open(dir.path()).expect("reopens durable ledgers");
    assert_eq!(final_process.proof.len(), 3);

    let report = final_process.proof.verify().expect("verifies");
    assert!(report.ok, "chain should be unbroken across three separate process lifetimes");
    assert!(report.first_break_index.is_none());

    let attestation_report = final_process.attestation.verify().expect("verifies");
    assert!(attestation_report.ok, "attestation log should also survive three reopens intact");
}
