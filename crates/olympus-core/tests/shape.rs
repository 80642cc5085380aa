// crates/olympus-core/tests/shape.rs
// ============================================================================
// Module: Shape Tests
// Description: Verifies criticality ordering and invariant classification.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeSet;

use olympus_core::Criticality;
use olympus_core::Shape;
use olympus_core::ShapeId;
use olympus_core::ShapeKind;

fn required(attrs: &[&str]) -> BTreeSet<String> {
    attrs.iter().map(|attr| (*attr).to_string()).collect()
}

#[test]
fn criticality_orders_strictest_first() {
    assert!(Criticality::Foundational < Criticality::Interactive);
    assert!(Criticality::Interactive < Criticality::Enhancement);
}

#[test]
fn invariant_shape_is_invariant_regardless_of_criticality() {
    let shape = Shape {
        id: ShapeId::new("s1"),
        kind: ShapeKind::Invariant,
        criticality: Criticality::Enhancement,
        required_attributes: required(&["a"]),
        optional_attributes: BTreeSet::new(),
        lineage: None,
    };
    assert!(shape.is_invariant());
}

#[test]
fn capability_shape_is_not_invariant() {
    let shape = Shape {
        id: ShapeId::new("s2"),
        kind: ShapeKind::Capability,
        criticality: Criticality::Foundational,
        required_attributes: required(&["a"]),
        optional_attributes: BTreeSet::new(),
        lineage: None,
    };
    assert!(!shape.is_invariant());
}
