// crates/olympus-core/tests/intervention.rs
// ============================================================================
// Module: Intervention and MCCS Tests
// Description: Verifies MCCS content-hash ids and ranking order.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use olympus_core::HandoffId;
use olympus_core::Intervention;
use olympus_core::InterventionType;
use olympus_core::LossClass;
use olympus_core::Mccs;
use olympus_core::ShapeId;

fn sample_intervention(shape: &str) -> Intervention {
    Intervention::new(
        ShapeId::new(shape),
        HandoffId::H2,
        InterventionType::AttributePreservation,
        "preserve attribute",
        0.98,
    )
}

#[test]
fn mccs_id_is_stable_regardless_of_input_order() {
    let a = Mccs::build(
        vec![sample_intervention("s1"), sample_intervention("s2")],
        0.1,
        true,
    )
    .expect("builds");
    let b = Mccs::build(
        vec![sample_intervention("s2"), sample_intervention("s1")],
        0.1,
        true,
    )
    .expect("builds");
    assert_eq!(a.id, b.id);
}

#[test]
fn mccs_id_differs_for_different_intervention_sets() {
    let a = Mccs::build(vec![sample_intervention("s1")], 0.1, true).expect("builds");
    let b = Mccs::build(vec![sample_intervention("s2")], 0.1, true).expect("builds");
    assert_ne!(a.id, b.id);
}

#[test]
fn ranking_prefers_fewer_interventions() {
    let small = Mccs::build(vec![sample_intervention("s1")], 0.1, true).expect("builds");
    let large = Mccs::build(
        vec![sample_intervention("s1"), sample_intervention("s2")],
        0.9,
        true,
    )
    .expect("builds");
    assert!(small.ranking_key() < large.ranking_key());
}

#[test]
fn ranking_prefers_higher_rsr_gain_when_cardinality_ties() {
    let better = Mccs::build(vec![sample_intervention("s1")], 0.9, true).expect("builds");
    let worse = Mccs::build(vec![sample_intervention("s2")], 0.1, true).expect("builds");
    assert!(better.ranking_key() < worse.ranking_key());
}

#[test]
fn ranking_falls_back_to_content_hash_id_on_exact_tie() {
    let a = Mccs::build(vec![sample_intervention("s1")], 0.5, true).expect("builds");
    let b = Mccs::build(vec![sample_intervention("s2")], 0.5, true).expect("builds");
    let ordered = if a.id < b.id { (a, b) } else { (b, a) };
    assert!(ordered.0.ranking_key() < ordered.1.ranking_key());
}

#[test]
fn for_loss_selects_summarization_bypass_for_l4_and_l6() {
    assert_eq!(
        InterventionType::for_loss(Some(LossClass::L4SummarizationLoss), false),
        InterventionType::SummarizationBypass
    );
    assert_eq!(
        InterventionType::for_loss(Some(LossClass::L6InvariantBypassLoss), true),
        InterventionType::SummarizationBypass
    );
}

#[test]
fn for_loss_selects_invariant_enforcement_on_invariant_shapes() {
    assert_eq!(
        InterventionType::for_loss(Some(LossClass::L3SpecificityLoss), true),
        InterventionType::InvariantEnforcement
    );
}

#[test]
fn for_loss_selects_attribute_preservation_otherwise() {
    assert_eq!(
        InterventionType::for_loss(Some(LossClass::L7SchemaMismatch), false),
        InterventionType::AttributePreservation
    );
    assert_eq!(InterventionType::for_loss(None, false), InterventionType::AttributePreservation);
}

#[test]
fn intervention_projected_rsr_is_rounded_to_survivability_precision() {
    let intervention = Intervention::new(
        ShapeId::new("s1"),
        HandoffId::H1,
        InterventionType::ExtractionPathAdd,
        "add extraction path",
        0.123_456_7,
    );
    assert_eq!(intervention.projected_rsr, 0.1235);
}
