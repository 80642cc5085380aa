// crates/olympus-gates/src/pipeline.rs
// ============================================================================
// Module: Pipeline Orchestrator
// Description: Runs the twelve gates in their fixed order and assembles the
// single resulting decision proof.
// Purpose: The only place the gate order is enforced and the only place
// every named ledger is appended to in one run.
// Dependencies: crate::gates::*, olympus_core::decision, olympus_ledger
// ============================================================================

//! ## Overview
//! §2 / §5: exactly one call to [`run`] per attempted action, producing
//! exactly one [`OlympusDecisionProof`]. Gates run in the fixed order IE,
//! AEC, RLL, OCIC, ORIS, NE, ICE, CIN, TSL, PCL, AAM, ODL. IE holds veto
//! power: a vetoed action never reaches AEC or any gate after it, though
//! the veto itself is still recorded to the proof ledger (§5 "a run always
//! produces exactly one proof"). Every other hard-block gate (RLL's
//! absolute reality lock, ORIS's invariant-loss rule, TSL's budget
//! exhaustion) similarly short-circuits the remaining gates once it fires,
//! but always still produces a proof.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use olympus_core::ActionSignature;
use olympus_core::AttemptedAction;
use olympus_core::AuthorityClass;
use olympus_core::BudgetState;
use olympus_core::Decision;
use olympus_core::EntropyState;
use olympus_core::EntropyBudget;
use olympus_core::EntropyComponents;
use olympus_core::Fingerprint;
use olympus_core::FingerprintSerializationError;
use olympus_core::FingerprintVerdict;
use olympus_core::InvariantId;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::LedgerIndex;
use olympus_core::Mccs;
use olympus_core::NecessaryFutureSummary;
use olympus_core::OlympusDecisionProof;
use olympus_core::ProofInputs;
use olympus_core::RealityDeviation;
use olympus_core::RunId;
use olympus_core::Shape;
use olympus_core::ShapeId;
use olympus_core::ShapeTraceResult;
use olympus_core::TemporalContract;
use olympus_core::TemporalContractSummary;
use olympus_core::CausalChainStep;
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

use crate::collector;
use crate::collector::HandoffAgents;
use crate::gates::aec;
use crate::gates::cin;
use crate::gates::ice;
use crate::gates::ie;
use crate::gates::ne;
use crate::gates::ocic;
use crate::gates::odl;
use crate::gates::oris;
use crate::gates::pcl;
use crate::gates::rll;
use crate::gates::tsl;
use crate::inspector;
use crate::tracker::ShapeMortalityTracker;

/// Failure modes of running the pipeline end to end. Every variant wraps a
/// gate's own fallible step; there is no catch-all case, since each gate's
/// error type already names exactly what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A ledger append or read failed somewhere in the run.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// A structural record could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintSerializationError),
    /// The Inevitability Engine's forward expansion failed.
    #[error(transparent)]
    Inevitability(#[from] ie::InevitabilityError),
    /// The Optimal Counterfactual Intervention Composer failed.
    #[error(transparent)]
    Ocic(#[from] ocic::OcicError),
    /// The Causal Fingerprint Collector failed.
    #[error(transparent)]
    Collector(#[from] collector::CollectorError),
}

/// Every ledger one pipeline run appends to, borrowed for the duration of
/// [`run`]. Grouping them here (rather than passing thirteen separate
/// arguments) keeps the fixed gate order the only thing `run` has to
/// reason about.
pub struct PipelineLedgers<'a> {
    /// Shape survival history, consulted before the gate sequence starts.
    pub mortality: &'a mut ShapeMortalityTracker,
    /// Doomed-fingerprint registry IE checks and files to.
    pub fingerprint_index: &'a mut FingerprintIndex,
    /// Per-handoff causal fingerprint records the collector appends to.
    pub cin: &'a mut CinLedger,
    /// IE's verdict history.
    pub inevitability: &'a mut InevitabilityLedger,
    /// AEC's per-run entropy history.
    pub entropy: &'a mut EntropyLedger,
    /// RLL's declared reality locks.
    pub singularity: &'a mut SingularityLedger,
    /// NE's selected necessary futures.
    pub necessity: &'a mut NecessityLedger,
    /// ODL's derived obligations and their lifecycle.
    pub obligation: &'a mut ObligationLedger,
    /// TSL's per-project budget consumption log.
    pub tsl: &'a mut TslLedger,
    /// The canonical proof ledger PCL scans and every run appends to.
    pub proof: &'a mut ProofLedger,
    /// The attestation log AAM chains each proof's continuity hash onto.
    pub attestation: &'a mut AttestationLog,
}

/// Everything one pipeline run needs that isn't a ledger: the attempt
/// itself, the shape it concerns, and the project-level state the upstream
/// caller has already resolved (§6 input).
pub struct PipelineInputs {
    /// The run this attempt is evaluated under.
    pub run_id: RunId,
    /// The action submitted for evaluation.
    pub action: AttemptedAction,
    /// The shape this action concerns.
    pub shape: Shape,
    /// This run's trace result for `shape`.
    pub trace: ShapeTraceResult,
    /// The agent pair that held `shape` on each side of every handoff
    /// `trace` crossed, keyed by handoff, for the causal fingerprint
    /// collector to attribute each transform to.
    pub handoff_agents: HandoffAgents,
    /// The project's declared temporal contract, if one exists.
    pub contract: Option<TemporalContract>,
    /// The project's current entropy budget.
    pub budget: EntropyBudget,
    /// This run's raw entropy components, before AEC's weighting.
    pub entropy_components: EntropyComponents,
    /// `true` if a prior run's MCCS is known to have converged, permitting
    /// AEC's phase to improve this run.
    pub mccs_convergence_detected: bool,
    /// Intents submitted alongside this attempt for ICE to classify.
    pub incoming_intents: Vec<ice::IncomingIntent>,
    /// Shapes this project's necessary future requires to stay intact,
    /// supplied by the caller since it is derived from project topology
    /// ICE does not itself track.
    pub preserved_shapes: BTreeSet<ShapeId>,
    /// Prior proof hashes the submitter has already had refuted by a
    /// sufficient authority (validated by AAM before this call).
    pub refuted_precedents: Vec<Fingerprint>,
    /// The authority class this attempt is attested under.
    pub authority_class: AuthorityClass,
    /// Parent proof hashes this proof chains from.
    pub parent_proof_hashes: Vec<Fingerprint>,
    /// The current run step, used by TSL's lifespan/mutation checks and
    /// ODL's obligation window tracker.
    pub current_step: u64,
    /// The number of mutations already committed for this project.
    pub mutations_committed: u64,
}

/// The result of one complete pipeline run: the built proof plus the
/// execution-summary tuple named in §6.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The single proof this run produced.
    pub proof: OlympusDecisionProof,
    /// `true` only if `proof.final_decision == Decision::Allow`.
    pub execution_allowed: bool,
    /// `true` unless the decision is `Block` or `PermanentReadOnly`.
    pub mutations_allowed: bool,
    /// The human-readable abort reason, if any.
    pub abort_reason: Option<String>,
}

/// Escalates `current` to `candidate` if `candidate` is strictly worse,
/// under the fixed severity order `Allow < ReadOnly < Block <
/// PermanentReadOnly`. Never downgrades.
fn escalate(current: Decision, candidate: Decision) -> Decision {
    const fn rank(decision: Decision) -> u8 {
        match decision {
            Decision::Allow => 0,
            Decision::ReadOnly => 1,
            Decision::Block => 2,
            Decision::PermanentReadOnly => 3,
        }
    }
    if rank(candidate) > rank(current) {
        candidate
    } else {
        current
    }
}

/// Runs the twelve-gate pipeline once for `inputs`, appending to every
/// ledger in `ledgers` along the way, and returns the single resulting
/// proof.
///
/// # Errors
/// Returns [`PipelineError`] if any gate's ledger access or fingerprinting
/// step fails. A gate *blocking* the action is never an error — it is
/// recorded as the proof's `final_decision`.
#[allow(clippy::too_many_lines, reason = "single fixed-order orchestration, not meant to be split")]
pub fn run(
    inputs: PipelineInputs,
    ledgers: &mut PipelineLedgers<'_>,
) -> Result<PipelineOutcome, PipelineError> {
    let span = tracing::info_span!("pipeline.run", run_id = %inputs.run_id, action_id = %inputs.action.action_id);
    let _guard = span.enter();

    let mut decision = Decision::Allow;
    let mut primary_invariant_violated: Option<InvariantId> = None;
    let mut causal_chain: Vec<CausalChainStep> = Vec::new();
    let mut forbidden_alternatives: Vec<Fingerprint> = Vec::new();
    let mut necessary_future_summary: Option<NecessaryFutureSummary> = None;

    // ---- Adaptive Inspector: size this run's scrutiny -------------------
    let inspection_depth = inspector::depth_for(ledgers.mortality.status_for(&inputs.shape.id));

    ledgers.mortality.observe(&inputs.shape, &inputs.trace)?;

    // ---- Causal Fingerprint Collector ---------------------------------
    let collected = collector::collect(
        ledgers.cin,
        ledgers.fingerprint_index,
        &inputs.run_id,
        &inputs.shape,
        &inputs.trace,
        &inputs.handoff_agents,
        inspection_depth,
    )?;
    if !collected.is_empty() {
        causal_chain.push(CausalChainStep::new(
            "cfc",
            format!(
                "collected {} causal fingerprint record(s) at {inspection_depth:?} depth",
                collected.len()
            ),
        ));
    }

    // ---- IE: Inevitability Engine (veto) -----------------------------
    let ie_verdict =
        ie::evaluate(&inputs.action, &inputs.trace, inputs.entropy_components, ledgers.fingerprint_index)?;
    ie::record(ledgers.inevitability, inputs.run_id.clone(), &ie_verdict)?;
    if ie_verdict.vetoed {
        ie::file_doomed(ledgers.fingerprint_index, inputs.run_id.clone(), &ie_verdict)?;
        causal_chain.push(CausalChainStep::new(
            "ie",
            if ie_verdict.short_circuited {
                "root fingerprint matched a previously filed doomed fingerprint"
            } else {
                "every forward-projected path has no survivable future"
            },
        ));
        forbidden_alternatives = vec![ie_verdict.root_fingerprint.clone()];
        decision = Decision::Block;
        primary_invariant_violated = Some(InvariantId::new("FUTURE_INEVITABILITY_VIOLATION"));
        return finalize(
            inputs,
            ledgers,
            decision,
            primary_invariant_violated,
            causal_chain,
            forbidden_alternatives,
            necessary_future_summary,
        );
    }

    // ---- AEC: Architectural Entropy Calculator -----------------------
    let entropy_state = aec::evaluate(
        ledgers.entropy,
        inputs.entropy_components,
        inputs.mccs_convergence_detected,
    )?;
    let phase_action = aec::action_for(entropy_state.phase);
    causal_chain.push(CausalChainStep::new(
        "aec",
        format!("entropy {:.2} classified as {:?}", entropy_state.value, entropy_state.phase),
    ));
    if matches!(phase_action, aec::PhaseAction::PermanentHalt) {
        decision = Decision::PermanentReadOnly;
        return finalize(
            inputs,
            ledgers,
            decision,
            primary_invariant_violated,
            causal_chain,
            forbidden_alternatives,
            necessary_future_summary,
        );
    }
    if matches!(phase_action, aec::PhaseAction::ReadOnly) {
        decision = escalate(decision, Decision::ReadOnly);
    }

    // ---- RLL: Reality Lock Ledger -------------------------------------
    let reality_deviation = rll::evaluate(ledgers.singularity, &ie_verdict.root_fingerprint)?;
    if let RealityDeviation::Forbidden { singularity_id, causing_run, .. } = &reality_deviation {
        causal_chain.push(CausalChainStep::new(
            "rll",
            format!("fingerprint forbidden by singularity {singularity_id} from run {causing_run}"),
        ));
        decision = Decision::Block;
        primary_invariant_violated = Some(InvariantId::new("REALITY_LOCK_VIOLATED"));
        return finalize(
            inputs,
            ledgers,
            decision,
            primary_invariant_violated,
            causal_chain,
            forbidden_alternatives,
            necessary_future_summary,
        );
    }

    // ---- OCIC: Optimal Counterfactual Intervention Composer -----------
    let historical_verdict = ledgers
        .fingerprint_index
        .entries()?
        .into_iter()
        .rev()
        .find(|entry| entry.payload.fingerprint == ie_verdict.root_fingerprint)
        .map(|entry| (entry.payload.fingerprint, entry.payload.verdict));
    let ocic_outcome = ocic::evaluate(
        &inputs.shape.id,
        inputs.shape.criticality,
        inputs.shape.is_invariant(),
        &inputs.trace,
        historical_verdict,
    )?;
    let mut candidate_mccs = None;
    match &ocic_outcome {
        ocic::OcicOutcome::NoInterventionRequired => {
            causal_chain.push(CausalChainStep::new("ocic", "no intervention required"));
        }
        ocic::OcicOutcome::BlockPreemptively { verdict, .. } => {
            causal_chain.push(CausalChainStep::new(
                "ocic",
                format!("predictive block against historical verdict {verdict:?}"),
            ));
            decision = Decision::Block;
            primary_invariant_violated = Some(InvariantId::new("FUTURE_INEVITABILITY_VIOLATION"));
            return finalize(
                inputs,
                ledgers,
                decision,
                primary_invariant_violated,
                causal_chain,
                forbidden_alternatives,
                necessary_future_summary,
            );
        }
        ocic::OcicOutcome::Composed(mccs) => {
            causal_chain.push(CausalChainStep::new(
                "ocic",
                format!("composed cut set of size {}", mccs.interventions.len()),
            ));
            candidate_mccs = Some(mccs.clone());
        }
        ocic::OcicOutcome::NoViableCutSet => {
            causal_chain.push(CausalChainStep::new("ocic", "no viable cut set satisfies tier law"));
        }
    }

    // ---- ORIS: Ontological Rigidity Invariant System -------------------
    let oris_outcome = oris::evaluate(&inputs.shape, &inputs.trace);
    causal_chain.push(CausalChainStep::new("oris", format!("{oris_outcome:?}")));
    match oris_outcome {
        oris::OrisOutcome::InvariantViolated => {
            decision = Decision::Block;
            primary_invariant_violated = Some(InvariantId::new("INVARIANT_SHAPE_LOSS"));
            return finalize(
                inputs,
                ledgers,
                decision,
                primary_invariant_violated,
                causal_chain,
                forbidden_alternatives,
                necessary_future_summary,
            );
        }
        oris::OrisOutcome::Blocked => {
            decision = Decision::Block;
        }
        oris::OrisOutcome::Forked => {
            decision = escalate(decision, Decision::ReadOnly);
        }
        oris::OrisOutcome::Warned | oris::OrisOutcome::Compliant => {}
    }
    if matches!(decision, Decision::Block) {
        return finalize(
            inputs,
            ledgers,
            decision,
            primary_invariant_violated,
            causal_chain,
            forbidden_alternatives,
            necessary_future_summary,
        );
    }

    // ---- NE: Necessity Engine ------------------------------------------
    let necessary_future = if let Some(mccs) = candidate_mccs {
        let future = ne::evaluate(&ie_verdict.root_fingerprint, &[mccs], inputs.entropy_components);
        match &future {
            Some(selected) => {
                causal_chain.push(CausalChainStep::new(
                    "ne",
                    format!("necessary future selected, survivable_steps={}", selected.survivable_steps),
                ));
                necessary_future_summary = Some(NecessaryFutureSummary {
                    doomed_fingerprint: selected.doomed_fingerprint.clone(),
                    mccs_id: selected.mccs.id.clone(),
                    tie_recorded: selected.tie_recorded,
                });
                ledgers.necessity.append(selected.clone())?;
            }
            None => {
                causal_chain.push(CausalChainStep::new("ne", "no candidate survived simulation: extinction"));
                decision = Decision::Block;
                primary_invariant_violated = Some(InvariantId::new("FUTURE_INEVITABILITY_VIOLATION"));
                return finalize(
                    inputs,
                    ledgers,
                    decision,
                    primary_invariant_violated,
                    causal_chain,
                    forbidden_alternatives,
                    necessary_future_summary,
                );
            }
        }
        future
    } else {
        None
    };

    // ---- ICE: Intent Collapse ------------------------------------------
    let mut equivalence_index = cin::EquivalenceIndex::new();
    if let Some(future) = &necessary_future {
        let cone = ice::CausalCone::derive(future, inputs.preserved_shapes.clone());
        let mut already_allowed = Vec::new();
        for intent in &inputs.incoming_intents {
            let verdict = ice::classify(&cone, intent, &already_allowed);
            if matches!(verdict.class, ice::IntentClass::Contradictory) {
                causal_chain.push(CausalChainStep::new(
                    "ice",
                    verdict.rejection_trace.clone().unwrap_or_default(),
                ));
                decision = Decision::Block;
                primary_invariant_violated = Some(InvariantId::new("INTENT_REJECTED"));
                return finalize(
                    inputs,
                    ledgers,
                    decision,
                    primary_invariant_violated,
                    causal_chain,
                    forbidden_alternatives,
                    necessary_future_summary,
                );
            }
            if matches!(verdict.class, ice::IntentClass::Aligned) {
                already_allowed.push(intent.action.action_id.clone());
                // ---- CIN: Canonical Intent Normalisation -------------
                equivalence_index.normalize(intent, verdict.class)?;
            }
        }
    }

    // ---- TSL: Temporal Sovereignty --------------------------------------
    // A necessary future already proved survivable by NE's own forward
    // simulation (§4.9); when NE never ran (no intervention was composed),
    // TSL's check 7 reuses the same simulation against a no-op cut set so
    // it is never a rubber stamp.
    let forward_simulation_passes = match &necessary_future {
        Some(_) => true,
        None => {
            let baseline = Mccs::build(Vec::new(), inputs.trace.overall_rsr, true)?;
            ne::simulate(&baseline, inputs.entropy_components).survivable
        }
    };
    let action_cost = f64::from(u32::try_from(inputs.action.affected_shapes.len()).unwrap_or(u32::MAX));
    let tsl_inputs = tsl::TslInputs {
        contract: inputs.contract.as_ref(),
        budget: &inputs.budget,
        action_cost,
        runs_completed: inputs.current_step,
        mutations_committed: inputs.mutations_committed,
        current_entropy: entropy_state.value,
        forward_simulation_passes,
        singularity_impact_contained: matches!(reality_deviation, RealityDeviation::None),
    };
    let tsl_outcome = tsl::evaluate(&tsl_inputs);
    let mut updated_budget = inputs.budget.clone();
    match tsl_outcome {
        tsl::TslOutcome::Blocked { check, block_reason } => {
            causal_chain.push(CausalChainStep::new("tsl", format!("{check:?}: {block_reason}")));
            decision = Decision::Block;
            primary_invariant_violated = Some(InvariantId::new(block_reason));
        }
        tsl::TslOutcome::Passed => {
            updated_budget = tsl::consume(ledgers.tsl, &inputs.budget, action_cost)?;
            if matches!(updated_budget.state, BudgetState::PermanentReadOnly) {
                decision = escalate(decision, Decision::PermanentReadOnly);
            }
        }
    }
    if matches!(decision, Decision::Block | Decision::PermanentReadOnly) {
        return finalize(
            inputs,
            ledgers,
            decision,
            primary_invariant_violated,
            causal_chain,
            forbidden_alternatives,
            necessary_future_summary,
        );
    }

    // ---- PCL: Proof Continuity -------------------------------------------
    let pcl_outcome = pcl::evaluate(
        ledgers.proof,
        &ie_verdict.root_fingerprint,
        decision,
        &inputs.refuted_precedents,
    )?;
    let mut refuted_precedents = Vec::new();
    match pcl_outcome {
        pcl::PclOutcome::Clear => {}
        pcl::PclOutcome::RefutedClear { refuted } => {
            causal_chain.push(CausalChainStep::new("pcl", "prior conflicting precedents successfully refuted"));
            refuted_precedents = refuted;
        }
        pcl::PclOutcome::Unrefuted { conflicts } => {
            causal_chain.push(CausalChainStep::new(
                "pcl",
                format!("{} unrefuted precedent conflict(s)", conflicts.len()),
            ));
            decision = Decision::Block;
            primary_invariant_violated = Some(InvariantId::new("PRECEDENT_UNREFUTED"));
            return finalize(
                inputs,
                ledgers,
                decision,
                primary_invariant_violated,
                causal_chain,
                forbidden_alternatives,
                necessary_future_summary,
            );
        }
    }

    // ---- ODL: Obligation Detection -----------------------------------------
    let mut obligations = Vec::new();
    if let Some(future) = &necessary_future {
        obligations.extend(odl::derive_from_future(future, inputs.current_step, inputs.run_id.as_str()));
    }
    if let Some(contract) = &inputs.contract {
        obligations.extend(odl::derive_from_contract(
            contract,
            inputs.current_step,
            inputs.mutations_committed,
            entropy_state.value,
            inputs.current_step,
            inputs.run_id.as_str(),
        ));
    }
    let odl_outcome = odl::evaluate(ledgers.obligation, &obligations, inputs.current_step)?;
    if odl_outcome.omission_detected {
        causal_chain.push(CausalChainStep::new("odl", "obligation window closed without fulfillment"));
    }
    if odl_outcome.blocks_progress {
        decision = escalate(decision, Decision::Block);
        primary_invariant_violated = Some(InvariantId::new("OBLIGATION_VIOLATED"));
    }

    let _ = updated_budget;
    let _ = refuted_precedents;

    finalize(
        inputs,
        ledgers,
        decision,
        primary_invariant_violated,
        causal_chain,
        forbidden_alternatives,
        necessary_future_summary,
    )
}

/// Builds the final proof from the accumulated decision state, attests it,
/// and appends it to the proof ledger.
fn finalize(
    inputs: PipelineInputs,
    ledgers: &mut PipelineLedgers<'_>,
    final_decision: Decision,
    primary_invariant_violated: Option<InvariantId>,
    causal_chain: Vec<CausalChainStep>,
    forbidden_alternatives: Vec<Fingerprint>,
    necessary_future_summary: Option<NecessaryFutureSummary>,
) -> Result<PipelineOutcome, PipelineError> {
    let action_fingerprint = ActionSignature::compute(&inputs.action)?.fingerprint;
    let entropy_state = ledgers
        .entropy
        .entries()?
        .into_iter()
        .last()
        .map(|entry| entry.payload)
        .unwrap_or_else(|| EntropyState::compute(inputs.entropy_components, None, false));
    let temporal_contract_summary = TemporalContractSummary {
        remaining_budget_ratio: inputs.budget.remaining_ratio(),
        permanently_read_only: inputs.budget.is_permanently_read_only(),
    };
    let attestation_tip_hash = ledgers
        .attestation
        .entries()?
        .into_iter()
        .last()
        .map_or_else(|| Fingerprint::from_hex(String::new()), |entry| entry.entry_hash);
    let ledger_index = LedgerIndex::new(ledgers.proof.len());

    let proof = OlympusDecisionProof::build(ProofInputs {
        run_id: inputs.run_id.clone(),
        action_fingerprint,
        final_decision,
        primary_invariant_violated,
        causal_chain,
        forbidden_alternatives,
        necessary_future_summary,
        entropy_state,
        temporal_contract_summary,
        parent_proof_hashes: inputs.parent_proof_hashes,
        refuted_precedents: inputs.refuted_precedents,
        authority_class: inputs.authority_class,
        invariant_supremacy_level: None,
        ledger_index,
        attestation_tip_hash,
    })?;

    ledgers.proof.append(proof.clone())?;
    ledgers.attestation.append(proof.continuity_hash.clone())?;

    let abort_reason = proof.abort_reason();
    let execution_allowed = matches!(proof.final_decision, Decision::Allow);
    let mutations_allowed =
        !matches!(proof.final_decision, Decision::Block | Decision::PermanentReadOnly);

    Ok(PipelineOutcome { proof, execution_allowed, mutations_allowed, abort_reason })
}
