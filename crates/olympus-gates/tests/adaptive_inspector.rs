// crates/olympus-gates/tests/adaptive_inspector.rs
// ============================================================================
// Module: Adaptive Inspector Tests
// Description: Exercises the pure mortality-status-to-inspection-depth map.
// ============================================================================

use olympus_core::MortalityStatus;
use olympus_gates::inspector::depth_for;
use olympus_gates::inspector::InspectionDepth;

#[test]
fn healthy_shapes_only_need_a_minimal_spot_check() {
    assert_eq!(depth_for(MortalityStatus::Healthy), InspectionDepth::Minimal);
}

#[test]
fn flaky_shapes_get_standard_per_handoff_inspection() {
    assert_eq!(depth_for(MortalityStatus::Flaky), InspectionDepth::Standard);
}

#[test]
fn systemically_broken_shapes_get_every_handoff_inspected() {
    assert_eq!(depth_for(MortalityStatus::SystemicallyBroken), InspectionDepth::Deep);
}

#[test]
fn a_degrading_trend_always_earns_the_deepest_scrutiny() {
    assert_eq!(depth_for(MortalityStatus::Degrading), InspectionDepth::Exhaustive);
}

#[test]
fn depth_is_totally_ordered_from_minimal_to_exhaustive() {
    assert!(InspectionDepth::Minimal < InspectionDepth::Standard);
    assert!(InspectionDepth::Standard < InspectionDepth::Deep);
    assert!(InspectionDepth::Deep < InspectionDepth::Exhaustive);
}
