// system-tests/tests/singularity_persists_across_restart.rs
// ============================================================================
// Module: Cross-Run Singularity Enforcement
// Description: Confirms a reality lock declared by one process survives a
// full ledger close/reopen and still blocks a later run.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use olympus_core::ActionSignature;
use olympus_core::Decision;
use olympus_core::DecisionSingularity;
use olympus_core::RunId;
use olympus_core::SingularityId;
use olympus_gates::gates::rll;
use olympus_gates::pipeline::run;
use system_tests::harness;
use system_tests::harness::Harness;

#[test]
fn a_singularity_declared_before_restart_still_blocks_after_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut first_process = Harness::open(dir.path()).expect("opens");
        let inputs = harness::base_inputs("act-first", 1);
        let outcome = run(inputs, &mut first_process.ledgers()).expect("pipeline runs");
        assert_eq!(outcome.proof.final_decision, Decision::Allow);

        let action = harness::clean_action("act-blocked");
        let forbidden_fingerprint = ActionSignature::compute(&action).expect("fingerprints").fingerprint;
        let causing_run = RunId::new("run-origin");
        let singularity = DecisionSingularity {
            id: SingularityId::new("sing-1"),
            created_from_run: causing_run.clone(),
            allowed_realities: BTreeSet::new(),
            forbidden_fingerprints: BTreeSet::from([forbidden_fingerprint.clone()]),
            causing_run_by_fingerprint: BTreeMap::from([(forbidden_fingerprint, causing_run)]),
        };
        rll::declare(&mut first_process.singularity, singularity).expect("declares");
    }

    let mut second_process = Harness::open(dir.path()).expect("reopens durable ledgers");
    let mut inputs = harness::base_inputs("act-blocked", 2);
    inputs.action = harness::clean_action("act-blocked");

    let outcome = run(inputs, &mut second_process.ledgers()).expect("pipeline runs");

    assert_eq!(outcome.proof.final_decision, Decision::Block);
    assert!(!outcome.execution_allowed);
    assert_eq!(
        second_process.proof.entries().expect("reads proof ledger").len(),
        2,
        "both the first allow and the second block were persisted to the same proof ledger"
    );
}
