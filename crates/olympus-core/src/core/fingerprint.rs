// crates/olympus-core/src/core/fingerprint.rs
// ============================================================================
// Module: OLYMPUS Fingerprint Primitive
// Description: 16-hex-character structural fingerprints of canonical records.
// Purpose: Give structurally identical records an identical, stable identity.
// Dependencies: crate::core::hashing, serde
// ============================================================================

//! ## Overview
//! Implements §4.1: `fingerprint(structural_record) -> 16-hex-prefix`.
//! Canonicalization rules, in order:
//! 1. Mapping keys emitted in lexicographic order at every depth (handled by
//!    `crate::core::hashing`'s RFC 8785 canonicalization).
//! 2. Order-independent sequences (shape/handoff/transform/direction sets)
//!    are represented as `BTreeSet`s by their owning types so they serialize
//!    pre-sorted; semantically ordered sequences stay as `Vec`s.
//! 3. Numerics are rounded to fixed precision by the caller before being
//!    placed in a structural record — see [`round_entropy`] and
//!    [`round_survivability`] — never by this module implicitly.
//! 4. Timestamps never participate: callers must not place a `Timestamp`
//!    field inside anything passed to [`fingerprint`].
//!
//! An empty input (`{}`) produces a stable, non-error fingerprint; only a
//! genuinely non-serializable value (for example a non-finite float) fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::hashing::hash_canonical_json;
use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashError;

// ============================================================================
// SECTION: Rounding Helpers
// ============================================================================

/// Decimal places entropy-domain numerics are rounded to before
/// fingerprinting.
pub const ENTROPY_PRECISION: i32 = 6;

/// Decimal places survivability-domain numerics (RSR, budget ratios) are
/// rounded to before fingerprinting.
pub const SURVIVABILITY_PRECISION: i32 = 4;

/// Rounds a value to [`ENTROPY_PRECISION`] decimal places.
#[must_use]
pub fn round_entropy(value: f64) -> f64 {
    round_to(value, ENTROPY_PRECISION)
}

/// Rounds a value to [`SURVIVABILITY_PRECISION`] decimal places.
#[must_use]
pub fn round_survivability(value: f64) -> f64 {
    round_to(value, SURVIVABILITY_PRECISION)
}

/// Rounds `value` to `places` decimal places.
#[must_use]
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ============================================================================
// SECTION: Fingerprint
// ============================================================================

/// A 16-hex-character SHA-256 prefix of a structural record's canonical
/// JSON serialization.
///
/// # Invariants
/// - Exactly 16 lowercase hex characters.
/// - Two structurally equivalent inputs always produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

/// Number of hex characters kept from the full SHA-256 digest.
const FINGERPRINT_HEX_LEN: usize = 16;

impl Fingerprint {
    /// Wraps an already-computed 16-hex-character value.
    ///
    /// Intended for deserialization and test fixtures; prefer
    /// [`fingerprint`] for computing one from a structural record.
    #[must_use]
    pub fn from_hex(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the fingerprint's hex value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Failure to compute a fingerprint.
#[derive(Debug, Error)]
pub enum FingerprintSerializationError {
    /// The structural record could not be canonicalized or hashed.
    #[error("failed to fingerprint structural record: {0}")]
    Hashing(#[from] HashError),
}

/// Computes the fingerprint of a structural record.
///
/// # Errors
/// Returns [`FingerprintSerializationError`] only when `value` cannot be
/// serialized (for example, it contains a non-finite float). An empty
/// input never errors; it produces the fingerprint of `{}`.
pub fn fingerprint<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Fingerprint, FingerprintSerializationError> {
    let digest = hash_canonical_json(HashAlgorithm::Sha256, value)?;
    let prefix = digest.value.get(..FINGERPRINT_HEX_LEN).unwrap_or(&digest.value);
    Ok(Fingerprint::from_hex(prefix.to_string()))
}
