// system-tests/src/lib.rs
// ============================================================================
// Module: OLYMPUS System Tests Library
// Description: Shared harness and fixtures for cross-run system scenarios.
// Purpose: Give `system-tests/tests/*.rs` a single reusable way to open a
// fresh set of ledgers and run attempts through the full pipeline, so each
// integration test can focus on the cross-run behavior it is checking.
// Dependencies: olympus-core, olympus-gates, olympus-ledger, tempfile
// ============================================================================

//! ## Overview
//! Per-crate test suites (`olympus-gates/tests/*.rs`) exercise one gate or
//! one pipeline run in isolation. This crate instead exercises sequences of
//! runs sharing the same durable ledgers, the properties the per-crate
//! suites cannot observe in a single `run()` call: that a singularity
//! declared by one run blocks a later one, that a ledger reopened from disk
//! resumes its chain correctly, and that the obligation window persists
//! obligations across an attempt boundary.

pub mod harness;
