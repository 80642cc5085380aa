// crates/olympus-core/tests/singularity.rs
// ============================================================================
// Module: Decision Singularity Tests
// Description: Verifies forbidden-fingerprint enforcement.
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

use olympus_core::enforce_singularities;
use olympus_core::DecisionSingularity;
use olympus_core::Fingerprint;
use olympus_core::RealityDeviation;
use olympus_core::RunId;
use olympus_core::SingularityId;

fn singularity_forbidding(fp: &Fingerprint, causing_run: &RunId) -> DecisionSingularity {
    let mut forbidden = BTreeSet::new();
    forbidden.insert(fp.clone());
    let mut causing = BTreeMap::new();
    causing.insert(fp.clone(), causing_run.clone());
    DecisionSingularity {
        id: SingularityId::new("sg-1"),
        created_from_run: causing_run.clone(),
        allowed_realities: BTreeSet::new(),
        forbidden_fingerprints: forbidden,
        causing_run_by_fingerprint: causing,
    }
}

#[test]
fn unforbidden_fingerprint_passes() {
    let causing_run = RunId::new("run-1");
    let forbidden_fp = Fingerprint::from_hex("aaaaaaaaaaaaaaaa");
    let singularity = singularity_forbidding(&forbidden_fp, &causing_run);
    let clean_fp = Fingerprint::from_hex("bbbbbbbbbbbbbbbb");
    assert_eq!(enforce_singularities([&singularity], &clean_fp), RealityDeviation::None);
}

#[test]
fn forbidden_fingerprint_is_caught_with_causing_run() {
    let causing_run = RunId::new("run-1");
    let forbidden_fp = Fingerprint::from_hex("aaaaaaaaaaaaaaaa");
    let singularity = singularity_forbidding(&forbidden_fp, &causing_run);
    let deviation = enforce_singularities([&singularity], &forbidden_fp);
    match deviation {
        RealityDeviation::Forbidden { singularity_id, fingerprint, causing_run: found } => {
            assert_eq!(singularity_id, SingularityId::new("sg-1"));
            assert_eq!(fingerprint, forbidden_fp);
            assert_eq!(found, causing_run);
        }
        RealityDeviation::None => panic!("expected a forbidden deviation"),
    }
}

#[test]
fn first_matching_singularity_wins_when_several_forbid() {
    let run_a = RunId::new("run-a");
    let run_b = RunId::new("run-b");
    let forbidden_fp = Fingerprint::from_hex("aaaaaaaaaaaaaaaa");
    let first = singularity_forbidding(&forbidden_fp, &run_a);
    let second = singularity_forbidding(&forbidden_fp, &run_b);
    let deviation = enforce_singularities([&first, &second], &forbidden_fp);
    match deviation {
        RealityDeviation::Forbidden { causing_run, .. } => assert_eq!(causing_run, run_a),
        RealityDeviation::None => panic!("expected a forbidden deviation"),
    }
}
