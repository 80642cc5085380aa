// crates/olympus-cli/src/main.rs
// ============================================================================
// Module: OLYMPUS Demo Runner
// Description: Minimal end-to-end OLYMPUS run using JSONL-backed ledgers in
// a scratch directory.
// Purpose: Demonstrate a single attempted action passing through all
// twelve gates and producing one decision proof.
// Dependencies: olympus-config, olympus-core, olympus-gates, olympus-ledger
// ============================================================================

//! ## Overview
//! Runs one clean, compliant action through the full pipeline using
//! in-process, JSONL-backed ledgers rooted at a temporary directory (or at
//! the directory named by an `olympus.toml`, when present). This binary is
//! backend-agnostic demonstration code, not a production entry point.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use olympus_config::OlympusConfig;
use olympus_core::ActionId;
use olympus_core::ActionType;
use olympus_core::AttemptedAction;
use olympus_core::AuthorityClass;
use olympus_core::ChangeDirection;
use olympus_core::Criticality;
use olympus_core::EntropyBudget;
use olympus_core::EntropyComponents;
use olympus_core::LedgerBackend;
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

/// Owns one scratch set of the ten ledgers/trackers a pipeline run needs.
struct Ledgers {
    _root: Option<tempfile::TempDir>,
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

impl Ledgers {
    fn open_in(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            _root: None,
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

    fn open_scratch() -> Result<Self, Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        let mut ledgers = Self::open_in(root.path())?;
        ledgers._root = Some(root);
        Ok(ledgers)
    }

    fn view(&mut self) -> PipelineLedgers<'_> {
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

/// Builds a routine, fully compliant attempted action.
fn demo_action() -> AttemptedAction {
    AttemptedAction {
        action_id: ActionId::new("demo-action"),
        action_type: ActionType::Update,
        description: "apply a routine attribute update".to_string(),
        affected_shapes: BTreeSet::from([ShapeId::new("demo-shape")]),
        affected_handoffs: BTreeSet::new(),
        transform_types: BTreeSet::new(),
        change_directions: BTreeSet::from([ChangeDirection::Modify]),
    }
}

/// Builds the shape governing the demo action.
fn demo_shape() -> Shape {
    Shape {
        id: ShapeId::new("demo-shape"),
        kind: ShapeKind::Capability,
        criticality: Criticality::Interactive,
        required_attributes: BTreeSet::from(["a".to_string(), "b".to_string()]),
        optional_attributes: BTreeSet::new(),
        lineage: None,
    }
}

/// Builds a trace showing the demo shape survived intact.
fn demo_trace() -> ShapeTraceResult {
    ShapeTraceResult {
        shape_id: ShapeId::new("demo-shape"),
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

/// Builds the temporal contract backing the demo project, preferring a
/// loaded config's declared contract over the built-in default.
fn demo_contract(config: &OlympusConfig) -> TemporalContract {
    config.contract.clone().unwrap_or(TemporalContract {
        project_id: ProjectId::new("demo-project"),
        intended_lifespan: 1000,
        allowed_future_mutations: 1000,
        max_entropy_drift: 0.5,
        baseline_entropy: 0.0,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = OlympusConfig::load(None).unwrap_or(OlympusConfig {
        ledger_root: std::env::temp_dir(),
        contract: None,
        log_directive: "info".to_string(),
    });
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.log_directive.clone()))
        .init();

    let mut ledgers = Ledgers::open_scratch()?;
    let inputs = PipelineInputs {
        run_id: RunId::new("demo-run"),
        action: demo_action(),
        shape: demo_shape(),
        trace: demo_trace(),
        handoff_agents: BTreeMap::new(),
        contract: Some(demo_contract(&config)),
        budget: EntropyBudget::new(ProjectId::new("demo-project"), 100.0),
        entropy_components: EntropyComponents::new(0.0, 0.0, 0.0, 0.0),
        mccs_convergence_detected: false,
        incoming_intents: Vec::<IncomingIntent>::new(),
        preserved_shapes: BTreeSet::new(),
        refuted_precedents: Vec::new(),
        authority_class: AuthorityClass::Project,
        parent_proof_hashes: Vec::new(),
        current_step: 1,
        mutations_committed: 0,
    };

    let outcome = run(inputs, &mut ledgers.view())?;

    write_line("Decision", &format!("{:?}", outcome.proof.final_decision))?;
    write_line("Execution allowed", &outcome.execution_allowed.to_string())?;
    write_line("Mutations allowed", &outcome.mutations_allowed.to_string())?;
    if let Some(reason) = &outcome.abort_reason {
        write_line("Abort reason", reason)?;
    }
    write_line("Proof hash", outcome.proof.proof_hash.as_str())?;
    Ok(())
}

/// Writes a labeled line to stdout.
fn write_line(label: &str, value: &str) -> Result<(), std::io::Error> {
    let mut out = std::io::stdout();
    writeln!(out, "{label}: {value}")?;
    Ok(())
}
