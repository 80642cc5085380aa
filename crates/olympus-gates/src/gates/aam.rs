// crates/olympus-gates/src/gates/aam.rs
// ============================================================================
// Module: Authority & Attestation (AAM)
// Description: Eleventh gate; validates refutation authority, appends to the
// attestation log, and detects forks against a remote copy of that log.
// Purpose: Ensure every accepted proof is entangled with its predecessor and
// that no refutation is honored from an insufficiently authorized source.
// Dependencies: olympus_core::authority, olympus_ledger::AttestationLog
// ============================================================================

//! ## Overview
//! §4.14: refutation requires `refuter.level() >= refuted_level.level()`
//! and `refuter ∈ invariant.refutable_by`, gated first by the invariant's
//! supremacy level — level 1 is unrefutable by any authority, including
//! `SYSTEM_ROOT`. Every accepted proof is appended to the attestation log,
//! chained by the previous entry's hash exactly as every other ledger is
//! (§9). Fork detection compares a remote attestation log against the
//! local one and classifies the divergence by its distance from the tip.

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::AuthorityClass;
use olympus_core::Fingerprint;
use olympus_core::Invariant;
use olympus_core::LedgerBackend;
use olympus_core::LedgerEntry;
use olympus_core::LedgerError;
use olympus_ledger::AttestationLog;

/// One request to refute a named invariant, submitted by a claimed
/// authority.
#[derive(Debug, Clone)]
pub struct RefutationClaim<'a> {
    /// The invariant being refuted.
    pub invariant: &'a Invariant,
    /// The authority level the invariant was originally enforced at.
    pub refuted_level: AuthorityClass,
    /// The authority level the refuter claims.
    pub refuter: AuthorityClass,
}

/// AAM's verdict on one refutation claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefutationOutcome {
    /// The refuter is authorized; the refutation is honored.
    Accepted,
    /// The invariant's supremacy level makes it unrefutable by any
    /// authority.
    Supreme,
    /// The refuter's level or class is insufficient.
    InsufficientAuthority,
}

/// Validates one refutation claim against the authority hierarchy (§4.14).
#[must_use]
pub fn evaluate_refutation(claim: &RefutationClaim<'_>) -> RefutationOutcome {
    let span = tracing::info_span!("aam.evaluate_refutation");
    let _guard = span.enter();

    if claim.invariant.supremacy_level <= olympus_core::authority::UNREFUTABLE_SUPREMACY_LEVEL {
        tracing::warn!(invariant = %claim.invariant.id, "refutation attempted against a supreme invariant");
        return RefutationOutcome::Supreme;
    }

    if claim.invariant.refutable_by_authority(claim.refuter, claim.refuted_level) {
        RefutationOutcome::Accepted
    } else {
        tracing::warn!(
            invariant = %claim.invariant.id,
            refuter_level = claim.refuter.level(),
            refuted_level = claim.refuted_level.level(),
            "refutation rejected: insufficient authority"
        );
        RefutationOutcome::InsufficientAuthority
    }
}

/// Appends `continuity_hash` to the attestation log, chaining it to the
/// prior tip exactly as the ledger backend already does for every other
/// named ledger.
///
/// # Errors
/// Returns [`LedgerError`] if the append fails.
pub fn attest(log: &mut AttestationLog, continuity_hash: Fingerprint) -> Result<LedgerEntry<Fingerprint>, LedgerError> {
    log.append(continuity_hash)
}

/// The current attestation tip, or `None` if the log is empty.
///
/// # Errors
/// Returns [`LedgerError`] if the log cannot be read.
pub fn tip(log: &AttestationLog) -> Result<Option<Fingerprint>, LedgerError> {
    Ok(log.entries()?.into_iter().last().map(|entry| entry.entry_hash))
}

/// The severity of divergence between a remote attestation log and the
/// local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ForkSeverity {
    /// The logs agree at the tip.
    None,
    /// The remote tip is one entry behind or ahead of local; likely a
    /// benign race between concurrent readers.
    Minor,
    /// The remote log diverges within the last ten entries.
    Major,
    /// The remote log diverges more than ten entries back, or shares no
    /// common prefix at all.
    Critical,
}

/// Compares a remote attestation log snapshot against the local one and
/// classifies the divergence.
///
/// Walks backward from each tip; the distance from the local tip to the
/// first index at which the two logs disagree (or one runs out of
/// entries) determines severity. Identical logs are [`ForkSeverity::None`].
#[must_use]
pub fn detect_fork(
    local: &[LedgerEntry<Fingerprint>],
    remote: &[LedgerEntry<Fingerprint>],
) -> ForkSeverity {
    let span = tracing::info_span!("aam.detect_fork");
    let _guard = span.enter();

    let shared_len = local.len().min(remote.len());
    let mut divergence_distance_from_tip = None;
    for offset in 0 .. shared_len {
        let local_index = local.len() - 1 - offset;
        let remote_index = remote.len() - 1 - offset;
        if local[local_index].entry_hash != remote[remote_index].entry_hash {
            divergence_distance_from_tip = Some(offset);
            break;
        }
    }

    let severity = match divergence_distance_from_tip {
        None if local.len() == remote.len() => ForkSeverity::None,
        None => ForkSeverity::Minor,
        Some(distance) if distance == 0 => ForkSeverity::Minor,
        Some(distance) if distance <= 10 => ForkSeverity::Major,
        Some(_) => ForkSeverity::Critical,
    };

    if !matches!(severity, ForkSeverity::None) {
        tracing::warn!(?severity, "attestation log fork detected against remote copy");
    }
    severity
}
