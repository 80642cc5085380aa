// crates/olympus-core/src/core/singularity.rs
// ============================================================================
// Module: OLYMPUS Decision Singularity
// Description: Immutable reality-lock artifacts enforced by RLL (§4.6).
// Purpose: Declare allowed and forbidden fingerprint sets for a run.
// Dependencies: crate::core::{fingerprint, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`DecisionSingularity`] is created exactly once per new violation with
//! a computed MCCS: its `allowed_realities` are the MCCS-derived action
//! fingerprints, its `forbidden_fingerprints` are the historical transform
//! hashes that caused loss. Once appended it is never modified — see
//! `crate::interfaces::LedgerBackend`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::fingerprint::Fingerprint;
use crate::core::identifiers::RunId;
use crate::core::identifiers::SingularityId;

// ============================================================================
// SECTION: Decision Singularity
// ============================================================================

/// An immutable reality lock.
///
/// # Invariants
/// - Never modified after creation; RLL only ever appends a new
///   singularity, it never edits an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSingularity {
    /// Identifier for this singularity.
    pub id: SingularityId,
    /// The run that caused this singularity to be created.
    pub created_from_run: RunId,
    /// Action fingerprints the underlying MCCS certifies as safe.
    pub allowed_realities: BTreeSet<Fingerprint>,
    /// Historical transform hashes that caused loss; any action whose
    /// fingerprint matches one of these is hard-aborted.
    pub forbidden_fingerprints: BTreeSet<Fingerprint>,
    /// For each forbidden fingerprint, the run that originally caused the
    /// loss — surfaced in the `RealityDeviation` abort reason.
    pub causing_run_by_fingerprint: BTreeMap<Fingerprint, RunId>,
}

/// The result of enforcing a set of singularities against an action
/// fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealityDeviation {
    /// No singularity forbids this fingerprint.
    None,
    /// A singularity's forbidden set contains this fingerprint.
    Forbidden {
        /// The singularity whose forbidden set matched.
        singularity_id: SingularityId,
        /// The action fingerprint that matched.
        fingerprint: Fingerprint,
        /// The run that originally caused this fingerprint to be
        /// forbidden.
        causing_run: RunId,
    },
}

/// Checks `fingerprint` against every active singularity's forbidden set.
/// Returns the first match found, in iteration order of `singularities`.
#[must_use]
pub fn enforce<'a>(
    singularities: impl IntoIterator<Item = &'a DecisionSingularity>,
    fingerprint: &Fingerprint,
) -> RealityDeviation {
    for singularity in singularities {
        if singularity.forbidden_fingerprints.contains(fingerprint) {
            let causing_run = singularity
                .causing_run_by_fingerprint
                .get(fingerprint)
                .cloned()
                .unwrap_or_else(|| singularity.created_from_run.clone());
            return RealityDeviation::Forbidden {
                singularity_id: singularity.id.clone(),
                fingerprint: fingerprint.clone(),
                causing_run,
            };
        }
    }
    RealityDeviation::None
}
