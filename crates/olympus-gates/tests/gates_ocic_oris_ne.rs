// crates/olympus-gates/tests/gates_ocic_oris_ne.rs
// ============================================================================
// Module: Intervention/Invariant/Necessity Gate Tests
// Description: Exercises OCIC's cut-set composition, ORIS's tier law
// enforcement, and NE's forward simulation and selection.
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

use olympus_core::Criticality;
use olympus_core::EntropyComponents;
use olympus_core::Fingerprint;
use olympus_core::FingerprintVerdict;
use olympus_core::HandoffDiff;
use olympus_core::HandoffId;
use olympus_core::Intervention;
use olympus_core::InterventionType;
use olympus_core::LossClass;
use olympus_core::Mccs;
use olympus_core::Shape;
use olympus_core::ShapeId;
use olympus_core::ShapeKind;
use olympus_core::ShapeTraceResult;
use olympus_core::StageId;
use olympus_core::SurvivalStatus;
use olympus_gates::gates::ne;
use olympus_gates::gates::ocic;
use olympus_gates::gates::oris;

fn shape(id: &str, kind: ShapeKind, criticality: Criticality) -> Shape {
    Shape {
        id: ShapeId::new(id),
        kind,
        criticality,
        required_attributes: BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()]),
        optional_attributes: BTreeSet::new(),
        lineage: None,
    }
}

fn clean_trace(shape_id: &str, rsr: f64) -> ShapeTraceResult {
    ShapeTraceResult {
        shape_id: ShapeId::new(shape_id),
        attributes_per_stage: BTreeMap::from([(
            StageId::Intake,
            BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()]),
        )]),
        handoff_diffs: Vec::new(),
        survival_status: SurvivalStatus {
            survived_to_target: rsr >= 1.0,
            failure_point: None,
            failure_class: None,
            present_attributes: BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()]),
        },
        overall_rsr: rsr,
    }
}

fn losing_trace(shape_id: &str, rsr: f64, loss_class: LossClass) -> ShapeTraceResult {
    let diff = HandoffDiff {
        handoff: HandoffId::H1,
        loss_detected: true,
        loss_class: Some(loss_class),
        attributes_before: BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()]),
        attributes_after: BTreeSet::from(["a".to_string(), "b".to_string()]),
        attributes_lost: BTreeSet::from(["c".to_string()]),
        summarization_invoked: true,
    };
    ShapeTraceResult {
        shape_id: ShapeId::new(shape_id),
        attributes_per_stage: BTreeMap::from([(
            StageId::Intake,
            BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()]),
        )]),
        handoff_diffs: vec![diff],
        survival_status: SurvivalStatus {
            survived_to_target: false,
            failure_point: Some(HandoffId::H1),
            failure_class: Some(loss_class),
            present_attributes: BTreeSet::from(["a".to_string(), "b".to_string()]),
        },
        overall_rsr: rsr,
    }
}

#[test]
fn ocic_requires_no_intervention_when_nothing_was_lost() {
    let trace = clean_trace("shape-1", 1.0);
    let outcome =
        ocic::evaluate(&ShapeId::new("shape-1"), Criticality::Interactive, false, &trace, None)
            .expect("evaluates");
    assert!(matches!(outcome, ocic::OcicOutcome::NoInterventionRequired));
}

#[test]
fn ocic_blocks_preemptively_against_a_historical_loss_verdict() {
    let trace = losing_trace("shape-1", 0.5, LossClass::L4SummarizationLoss);
    let historical = (Fingerprint::from_hex("aa11bb22cc33dd44"), FingerprintVerdict::CausedLoss);
    let outcome = ocic::evaluate(
        &ShapeId::new("shape-1"),
        Criticality::Interactive,
        false,
        &trace,
        Some(historical),
    )
    .expect("evaluates");
    assert!(matches!(outcome, ocic::OcicOutcome::BlockPreemptively { .. }));
}

#[test]
fn ocic_composes_a_minimal_cut_set_that_restores_compliance() {
    let trace = losing_trace("shape-1", 0.5, LossClass::L4SummarizationLoss);
    let outcome =
        ocic::evaluate(&ShapeId::new("shape-1"), Criticality::Interactive, false, &trace, None)
            .expect("evaluates");
    match outcome {
        ocic::OcicOutcome::Composed(mccs) => {
            assert!(!mccs.interventions.is_empty());
            assert!(mccs.interventions.len() <= ocic::MAX_MCCS_SIZE);
            assert!(mccs.invariant_safety);
        }
        other => panic!("expected a composed cut set, got {other:?}"),
    }
}

#[test]
fn oris_flags_any_loss_on_an_invariant_shape_regardless_of_tier() {
    let invariant_shape = shape("shape-1", ShapeKind::Invariant, Criticality::Enhancement);
    let trace = losing_trace("shape-1", 0.99, LossClass::L3SpecificityLoss);
    assert_eq!(oris::evaluate(&invariant_shape, &trace), oris::OrisOutcome::InvariantViolated);
}

#[test]
fn oris_flags_a_failed_survival_on_an_invariant_shape_even_without_a_reported_loss() {
    let invariant_shape = shape("shape-1", ShapeKind::Invariant, Criticality::Enhancement);
    let mut trace = clean_trace("shape-1", 1.0);
    trace.survival_status.survived_to_target = false;
    trace.survival_status.failure_point = Some(HandoffId::H1);
    assert_eq!(oris::evaluate(&invariant_shape, &trace), oris::OrisOutcome::InvariantViolated);
}

#[test]
fn oris_blocks_a_foundational_tier_violation() {
    let foundational = shape("shape-1", ShapeKind::Capability, Criticality::Foundational);
    let trace = losing_trace("shape-1", 0.9, LossClass::L3SpecificityLoss);
    assert_eq!(oris::evaluate(&foundational, &trace), oris::OrisOutcome::Blocked);
}

#[test]
fn oris_forks_an_interactive_tier_violation() {
    let interactive = shape("shape-1", ShapeKind::Capability, Criticality::Interactive);
    let trace = losing_trace("shape-1", 0.5, LossClass::L4SummarizationLoss);
    assert_eq!(oris::evaluate(&interactive, &trace), oris::OrisOutcome::Forked);
}

#[test]
fn oris_warns_on_an_enhancement_tier_violation() {
    let enhancement = shape("shape-1", ShapeKind::Capability, Criticality::Enhancement);
    let trace = losing_trace("shape-1", 0.5, LossClass::L7SchemaMismatch);
    assert_eq!(oris::evaluate(&enhancement, &trace), oris::OrisOutcome::Warned);
}

#[test]
fn oris_is_compliant_when_the_tier_law_is_satisfied() {
    let interactive = shape("shape-1", ShapeKind::Capability, Criticality::Interactive);
    let trace = clean_trace("shape-1", 1.0);
    assert_eq!(oris::evaluate(&interactive, &trace), oris::OrisOutcome::Compliant);
}

fn build_mccs(intervention_count: usize, rsr_gain: f64) -> Mccs {
    let interventions: Vec<Intervention> = (0 .. intervention_count)
        .map(|i| {
            Intervention::new(
                ShapeId::new(format!("shape-{i}")),
                HandoffId::H1,
                InterventionType::AttributePreservation,
                "restore the dropped attribute",
                rsr_gain,
            )
        })
        .collect();
    Mccs::build(interventions, rsr_gain, true).expect("builds")
}

#[test]
fn ne_selects_the_smaller_survivable_candidate() {
    let doomed = Fingerprint::from_hex("0123456789abcdef");
    let starting = EntropyComponents::new(0.1, 0.1, 0.0, 0.1);
    let small = build_mccs(1, 0.9);
    let large = build_mccs(2, 0.9);

    let future = ne::evaluate(&doomed, &[large, small], starting).expect("a survivable future exists");
    assert_eq!(future.mccs.interventions.len(), 1);
    assert_eq!(future.doomed_fingerprint, doomed);
}

#[test]
fn ne_reports_extinction_when_no_candidate_survives() {
    let doomed = Fingerprint::from_hex("fedcba9876543210");
    let collapsing_start = EntropyComponents::new(1.0, 1.0, 1.0, 1.0);
    let zero_gain = build_mccs(1, 0.0);

    let future = ne::evaluate(&doomed, std::slice::from_ref(&zero_gain), collapsing_start);
    assert!(future.is_none());
}

#[test]
fn ne_simulate_tracks_survivable_steps_and_entropy_ceiling() {
    let starting = EntropyComponents::new(0.5, 0.1, 0.0, 0.1);
    let candidate = build_mccs(1, 0.8);
    let result = ne::simulate(&candidate, starting);
    assert!(result.entropy_ceiling >= 0.0);
    assert!(result.survivable_steps <= ne::SIMULATION_DEPTH);
}
