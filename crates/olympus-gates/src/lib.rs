// crates/olympus-gates/src/lib.rs
// ============================================================================
// Crate: olympus-gates
// Description: The twelve-gate governance pipeline (IE -> AEC -> RLL -> OCIC
// -> ORIS -> NE -> ICE -> CIN -> TSL -> PCL -> AAM -> ODL) plus the shared
// helpers [`pipeline::run`] calls alongside them (mortality tracking,
// adaptive inspection, causal fingerprint collection, counterfactual
// replay).
// Purpose: Turn per-run trace data into exactly one OlympusDecisionProof.
// ============================================================================

//! ## Overview
//! Every gate in this crate is a pure function of its declared inputs, the
//! upstream intelligence object, and the append-only ledgers it reads (see
//! `olympus_core::interfaces::LedgerBackend`). None of them hold their own
//! mutable state between calls; [`pipeline::run`] is the only place the
//! fixed gate order is enforced and the only place ledgers are appended to.

pub mod collector;
pub mod gates;
pub mod inspector;
pub mod pipeline;
pub mod replay;
pub mod tracker;

pub use pipeline::run;
pub use pipeline::PipelineError;
pub use pipeline::PipelineInputs;
pub use pipeline::PipelineLedgers;
pub use pipeline::PipelineOutcome;
