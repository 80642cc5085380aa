// crates/olympus-gates/tests/pipeline_run.rs
// ============================================================================
// Module: Pipeline Orchestrator Integration Tests
// Description: Exercises the full twelve-gate run end to end: one clean
// allow path and one hard-block path short-circuited by a reality lock.
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

use olympus_core::ActionId;
use olympus_core::ActionSignature;
use olympus_core::ActionType;
use olympus_core::AgentId;
use olympus_core::AttemptedAction;
use olympus_core::AuthorityClass;
use olympus_core::ChangeDirection;
use olympus_core::Criticality;
use olympus_core::Decision;
use olympus_core::DecisionSingularity;
use olympus_core::EntropyBudget;
use olympus_core::EntropyComponents;
use olympus_core::FingerprintVerdict;
use olympus_core::HandoffDiff;
use olympus_core::HandoffId;
use olympus_core::InvariantId;
use olympus_core::LedgerBackend;
use olympus_core::LossClass;
use olympus_core::ProjectId;
use olympus_core::RunId;
use olympus_core::Shape;
use olympus_core::ShapeId;
use olympus_core::ShapeKind;
use olympus_core::ShapeTraceResult;
use olympus_core::SingularityId;
use olympus_core::StageId;
use olympus_core::SurvivalStatus;
use olympus_core::TemporalContract;
use olympus_gates::gates::ice::IncomingIntent;
use olympus_gates::gates::rll;
use olympus_gates::pipeline::PipelineInputs;
use olympus_gates::pipeline::PipelineLedgers;
use olympus_gates::pipeline::run;
use olympus_gates::tracker::ShapeMortalityTracker;
use olympus_ledger::AttestationLog;
use olympus_ledger::CinLedger;
use olympus_ledger::EntropyLedger;
use olympus_ledger::FingerprintIndex;
use olympus_ledger::InevitabilityLedger;
use olympus_ledger::NecessityLedger;
use olympus_ledger::ObligationLedger;
use olympus_ledger::ProofLedger;
use olympus_ledger::SingularityLedger;
use olympus_ledger::TslLedger;

struct Harness {
    _dir: tempfile::TempDir,
    mortality: ShapeMortalityTracker,
    fingerprint_index: FingerprintIndex,
    cin: CinLedger,
    inevitability: InevitabilityLedger,
    entropy: EntropyLedger,
    singularity: SingularityLedger,
    necessity: NecessityLedger,
    obligation: ObligationLedger,
    tsl: TslLedger,
    proof: ProofLedger,
    attestation: AttestationLog,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mortality = ShapeMortalityTracker::open(dir.path().join("mortality.jsonl")).expect("opens");
        let fingerprint_index = FingerprintIndex::open(dir.path().join("fingerprints.jsonl")).expect("opens");
        let cin = CinLedger::open(dir.path().join("cin.jsonl")).expect("opens");
        let inevitability = InevitabilityLedger::open(dir.path().join("inevitability.jsonl")).expect("opens");
        let entropy = EntropyLedger::open(dir.path().join("entropy.jsonl")).expect("opens");
        let singularity = SingularityLedger::open(dir.path().join("singularity.jsonl")).expect("opens");
        let necessity = NecessityLedger::open(dir.path().join("necessity.jsonl")).expect("opens");
        let obligation = ObligationLedger::open(dir.path().join("obligation.jsonl")).expect("opens");
        let tsl = TslLedger::open(dir.path().join("tsl.jsonl")).expect("opens");
        let proof = ProofLedger::open(dir.path().join("proof.jsonl")).expect("opens");
        let attestation = AttestationLog::open(dir.path().join("attestation.jsonl")).expect("opens");
        Self {
            _dir: dir,
            mortality,
            fingerprint_index,
            cin,
            inevitability,
            entropy,
            singularity,
            necessity,
            obligation,
            tsl,
            proof,
            attestation,
        }
    }

    fn ledgers(&mut self) -> PipelineLedgers<'_> {
        PipelineLedgers {
            mortality: &mut self.mortality,
            fingerprint_index: &mut self.fingerprint_index,
            cin: &mut self.cin,
            inevitability: &mut self.inevitability,
            entropy: &mut self.entropy,
            singularity: &mut self.singularity,
            necessity: &mut self.necessity,
            obligation: &mut self.obligation,
            tsl: &mut self.tsl,
            proof: &mut self.proof,
            attestation: &mut self.attestation,
        }
    }
}

fn clean_action(id: &str) -> AttemptedAction {
    AttemptedAction {
        action_id: ActionId::new(id),
        action_type: ActionType::Update,
        description: "apply a routine attribute update".to_string(),
        affected_shapes: BTreeSet::from([ShapeId::new("shape-1")]),
        affected_handoffs: BTreeSet::new(),
        transform_types: BTreeSet::new(),
        change_directions: BTreeSet::from([ChangeDirection::Modify]),
    }
}

fn compliant_shape() -> Shape {
    Shape {
        id: ShapeId::new("shape-1"),
        kind: ShapeKind::Capability,
        criticality: Criticality::Interactive,
        required_attributes: BTreeSet::from(["a".to_string(), "b".to_string()]),
        optional_attributes: BTreeSet::new(),
        lineage: None,
    }
}

fn survived_trace() -> ShapeTraceResult {
    ShapeTraceResult {
        shape_id: ShapeId::new("shape-1"),
        attributes_per_stage: BTreeMap::from([(
            StageId::Intake,
            BTreeSet::from(["a".to_string(), "b".to_string()]),
        )]),
        handoff_diffs: Vec::new(),
        survival_status: SurvivalStatus {
            survived_to_target: true,
            failure_point: None,
            failure_class: None,
            present_attributes: BTreeSet::from(["a".to_string(), "b".to_string()]),
        },
        overall_rsr: 1.0,
    }
}

fn contract() -> TemporalContract {
    TemporalContract {
        project_id: ProjectId::new("project-1"),
        intended_lifespan: 1000,
        allowed_future_mutations: 1000,
        max_entropy_drift: 0.5,
        baseline_entropy: 0.0,
    }
}

fn base_inputs(action_id: &str) -> PipelineInputs {
    PipelineInputs {
        run_id: RunId::new(format!("run-{action_id}")),
        action: clean_action(action_id),
        shape: compliant_shape(),
        trace: survived_trace(),
        handoff_agents: BTreeMap::new(),
        contract: Some(contract()),
        budget: EntropyBudget::new(ProjectId::new("project-1"), 100.0),
        entropy_components: EntropyComponents::new(0.0, 0.0, 0.0, 0.0),
        mccs_convergence_detected: false,
        incoming_intents: Vec::<IncomingIntent>::new(),
        preserved_shapes: BTreeSet::new(),
        refuted_precedents: Vec::new(),
        authority_class: AuthorityClass::Project,
        parent_proof_hashes: Vec::new(),
        current_step: 1,
        mutations_committed: 0,
    }
}

#[test]
fn a_fully_compliant_attempt_is_allowed_end_to_end() {
    let mut harness = Harness::new();
    let inputs = base_inputs("act-allow");

    let outcome = run(inputs, &mut harness.ledgers()).expect("pipeline runs");

    assert_eq!(outcome.proof.final_decision, Decision::Allow);
    assert!(outcome.execution_allowed);
    assert!(outcome.mutations_allowed);
    assert!(outcome.abort_reason.is_none());
    assert_eq!(harness.proof.len(), 1);
    assert_eq!(harness.attestation.len(), 1);
}

#[test]
fn a_reality_locked_fingerprint_blocks_before_any_later_gate_runs() {
    let mut harness = Harness::new();
    let action = clean_action("act-blocked");
    let forbidden_fingerprint = ActionSignature::compute(&action).expect("fingerprints").fingerprint;

    let causing_run = RunId::new("run-origin");
    let singularity = DecisionSingularity {
        id: SingularityId::new("sing-1"),
        created_from_run: causing_run.clone(),
        allowed_realities: BTreeSet::new(),
        forbidden_fingerprints: BTreeSet::from([forbidden_fingerprint.clone()]),
        causing_run_by_fingerprint: BTreeMap::from([(forbidden_fingerprint, causing_run)]),
    };
    rll::declare(&mut harness.singularity, singularity).expect("declares");

    let mut inputs = base_inputs("act-blocked");
    inputs.action = action;

    let outcome = run(inputs, &mut harness.ledgers()).expect("pipeline runs");

    assert_eq!(outcome.proof.final_decision, Decision::Block);
    assert!(!outcome.execution_allowed);
    assert!(!outcome.mutations_allowed);
    assert_eq!(
        outcome.proof.primary_invariant_violated.as_ref().map(InvariantId::as_str),
        Some("REALITY_LOCK_VIOLATED")
    );
    assert!(outcome.abort_reason.is_some());
    assert_eq!(harness.necessity.len(), 0, "ORIS/NE never ran once RLL short-circuited the attempt");
}

#[test]
fn a_losing_handoff_is_collected_into_the_cin_ledger_and_fingerprint_index() {
    let mut harness = Harness::new();
    let mut inputs = base_inputs("act-collect");
    let diff = HandoffDiff {
        handoff: HandoffId::H1,
        loss_detected: true,
        loss_class: Some(LossClass::L3SpecificityLoss),
        attributes_before: BTreeSet::from(["a".to_string(), "b".to_string()]),
        attributes_after: BTreeSet::from(["a".to_string()]),
        attributes_lost: BTreeSet::from(["b".to_string()]),
        summarization_invoked: false,
    };
    inputs.trace.handoff_diffs = vec![diff];
    inputs.trace.overall_rsr = 0.5;
    inputs.handoff_agents = BTreeMap::from([(
        HandoffId::H1,
        (AgentId::new("agent-intake"), AgentId::new("agent-build")),
    )]);

    run(inputs, &mut harness.ledgers()).expect("pipeline runs");

    assert_eq!(harness.cin.len(), 1);
    let filed_verdict = harness
        .fingerprint_index
        .entries()
        .expect("reads")
        .into_iter()
        .find(|entry| entry.payload.verdict == FingerprintVerdict::CausedLoss);
    assert!(filed_verdict.is_some(), "collector must file a CausedLoss verdict for the lost handoff");
}
