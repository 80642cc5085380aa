// crates/olympus-core/src/lib.rs
// ============================================================================
// Crate: olympus-core
// Description: Data model and backend-agnostic interfaces for the OLYMPUS
// runtime governance engine.
// Purpose: Give every gate in `olympus-gates` a single, stable vocabulary of
// structural types, identifiers, and fingerprints to operate on.
// ============================================================================

//! ## Overview
//! `olympus-core` has no knowledge of the twelve-gate pipeline itself (that
//! lives in `olympus-gates`) and no knowledge of how ledgers are persisted
//! (that lives in `olympus-ledger`). It defines:
//! - the structural data model (shapes, handoffs, actions, interventions,
//!   singularities, necessary futures, proofs);
//! - the fingerprint primitive every structural record is hashed through;
//! - the [`interfaces::LedgerBackend`] trait a storage crate implements.
//!
//! No gate reads wall-clock time and no timestamp ever participates in a
//! fingerprint; see [`core::time`] and [`core::fingerprint`].

pub mod core;
pub mod interfaces;

pub use core::*;
pub use interfaces::LedgerBackend;
pub use interfaces::LedgerEntry;
pub use interfaces::LedgerError;
pub use interfaces::VerifyReport;
