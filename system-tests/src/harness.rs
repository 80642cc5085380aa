// system-tests/src/harness.rs
// ============================================================================
// Module: Pipeline Test Harness
// Description: Owns one set of the ten durable ledgers/trackers a pipeline
// run needs, and builds the fixture inputs for a routine, compliant attempt.
// Purpose: Let system tests reopen the same on-disk ledgers across multiple
// `run()` calls instead of each test wiring its own set.
// Dependencies: olympus-core, olympus-gates, olympus-ledger
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use olympus_core::ActionId;
use olympus_core::ActionType;
use olympus_core::AttemptedAction;
use olympus_core::AuthorityClass;
use olympus_core::ChangeDirection;
use olympus_core::Criticality;
use olympus_core::EntropyBudget;
use olympus_core::EntropyComponents;
use olympus_core::LedgerError;
use olympus_core::ProjectId;
use olympus_core::RunId;
use olympus_core::Shape;
use olympus_core::ShapeId;
use olympus_core::ShapeKind;
use olympus_core::ShapeTraceResult;
use olympus_core::StageId;
use olympus_core::SurvivalStatus;
use olympus_core::TemporalContract;
use olympus_gates::gates::ice::IncomingIntent;
use olympus_gates::pipeline::PipelineInputs;
use olympus_gates::pipeline::PipelineLedgers;
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

/// A durable set of the ledgers and trackers one pipeline run needs, rooted
/// at a caller-owned directory.
pub struct Harness {
    /// Open mortality tracker.
    pub mortality: ShapeMortalityTracker,
    /// Open fingerprint index.
    pub fingerprint_index: FingerprintIndex,
    /// Open causal fingerprint collector ledger.
    pub cin: CinLedger,
    /// Open inevitability ledger.
    pub inevitability: InevitabilityLedger,
    /// Open entropy ledger.
    pub entropy: EntropyLedger,
    /// Open singularity ledger.
    pub singularity: SingularityLedger,
    /// Open necessity ledger.
    pub necessity: NecessityLedger,
    /// Open obligation ledger.
    pub obligation: ObligationLedger,
    /// Open temporal safety ledger.
    pub tsl: TslLedger,
    /// Open proof ledger.
    pub proof: ProofLedger,
    /// Open attestation log.
    pub attestation: AttestationLog,
}

impl Harness {
    /// Opens a fresh set of ledgers rooted at `dir`. Calling this again
    /// with the same `dir` reopens the ledgers already durable there,
    /// rather than starting a new chain.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when any individual ledger fails to open.
    pub fn open(dir: &Path) -> Result<Self, LedgerError> {
        Ok(Self {
            mortality: ShapeMortalityTracker::open(dir.join("mortality.jsonl"))?,
            fingerprint_index: FingerprintIndex::open(dir.join("fingerprints.jsonl"))?,
            cin: CinLedger::open(dir.join("cin.jsonl"))?,
            inevitability: InevitabilityLedger::open(dir.join("inevitability.jsonl"))?,
            entropy: EntropyLedger::open(dir.join("entropy.jsonl"))?,
            singularity: SingularityLedger::open(dir.join("singularity.jsonl"))?,
            necessity: NecessityLedger::open(dir.join("necessity.jsonl"))?,
            obligation: ObligationLedger::open(dir.join("obligation.jsonl"))?,
            tsl: TslLedger::open(dir.join("tsl.jsonl"))?,
            proof: ProofLedger::open(dir.join("proof.jsonl"))?,
            attestation: AttestationLog::open(dir.join("attestation.jsonl"))?,
        })
    }

    /// Borrows every ledger as the view [`olympus_gates::pipeline::run`]
    /// expects.
    pub fn ledgers(&mut self) -> PipelineLedgers<'_> {
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

/// Builds a routine, fully compliant attempted action with the given id.
#[must_use]
pub fn clean_action(id: &str) -> AttemptedAction {
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

/// Builds the shape governing [`clean_action`].
#[must_use]
pub fn compliant_shape() -> Shape {
    Shape {
        id: ShapeId::new("shape-1"),
        kind: ShapeKind::Capability,
        criticality: Criticality::Interactive,
        required_attributes: BTreeSet::from(["a".to_string(), "b".to_string()]),
        optional_attributes: BTreeSet::new(),
        lineage: None,
    }
}

/// Builds a trace showing [`compliant_shape`] survived intact.
#[must_use]
pub fn survived_trace() -> ShapeTraceResult {
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

/// Builds the temporal contract backing the fixture project.
#[must_use]
pub fn contract() -> TemporalContract {
    TemporalContract {
        project_id: ProjectId::new("project-1"),
        intended_lifespan: 1000,
        allowed_future_mutations: 1000,
        max_entropy_drift: 0.5,
        baseline_entropy: 0.0,
    }
}

/// Builds a complete, compliant [`PipelineInputs`] for the named action at
/// the given step.
#[must_use]
pub fn base_inputs(action_id: &str, current_step: u64) -> PipelineInputs {
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
        current_step,
        mutations_committed: 0,
    }
}
