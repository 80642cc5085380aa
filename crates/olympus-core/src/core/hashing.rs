// crates/olympus-core/src/core/hashing.rs
// ============================================================================
// Module: OLYMPUS Hashing Primitive
// Description: Canonical JSON serialization and SHA-256 digesting.
// Purpose: Give every structural record a stable, cross-implementation hash.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Every fingerprint and every hash-chained ledger entry in OLYMPUS is built
//! on top of this module: serialize a value to RFC 8785 canonical JSON, then
//! SHA-256 the resulting bytes. No insignificant whitespace, keys sorted
//! lexicographically at every depth, numerics emitted exactly as rounded by
//! the caller (see `crate::core::fingerprint` for the rounding rules).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Hash Algorithm
// ============================================================================

/// Hash algorithms supported for canonical digests.
///
/// # Invariants
/// - Variants are stable for serialization and proof verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256, the only algorithm OLYMPUS persists today.
    Sha256,
}

/// The hash algorithm used unless a ledger entry names another.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Maximum canonical JSON payload size accepted by [`hash_canonical_json_with_limit`].
///
/// Chosen generously above any single structural record OLYMPUS produces;
/// exists to fail closed on a malformed or adversarial input rather than
/// hash an unbounded allocation.
pub const DEFAULT_SIZE_LIMIT: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Digest
// ============================================================================

/// A hex-encoded digest with its algorithm tag.
///
/// # Invariants
/// - `value` is always lowercase hex with a length matching `algorithm`'s
///   output size (64 characters for SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Algorithm used to produce `value`.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex encoding of the digest bytes.
    pub value: String,
}

impl HashDigest {
    /// Builds a digest from raw algorithm output bytes.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, bytes: &[u8]) -> Self {
        Self { algorithm, value: hex_encode(bytes) }
    }

    /// Returns the digest's hex value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure modes of canonicalization and hashing.
#[derive(Debug, Error)]
pub enum HashError {
    /// The value could not be serialized to canonical JSON.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
    /// The canonical JSON payload exceeded the configured size limit.
    #[error("canonical json payload of {actual} bytes exceeds limit of {limit} bytes")]
    SizeLimitExceeded {
        /// The configured limit, in bytes.
        limit: usize,
        /// The actual canonical payload size, in bytes.
        actual: usize,
    },
}

// ============================================================================
// SECTION: Canonicalization
// ============================================================================

/// Serializes `value` to RFC 8785 canonical JSON bytes.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] if `value` contains data that
/// cannot be canonicalized (for example a non-finite float).
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Serializes `value` to canonical JSON bytes, rejecting payloads over
/// `limit` bytes.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] on serialization failure, or
/// [`HashError::SizeLimitExceeded`] if the canonical payload is larger than
/// `limit`.
pub fn canonical_json_bytes_with_limit<T: Serialize + ?Sized>(
    value: &T,
    limit: usize,
) -> Result<Vec<u8>, HashError> {
    let bytes = canonical_json_bytes(value)?;
    if bytes.len() > limit {
        return Err(HashError::SizeLimitExceeded { limit, actual: bytes.len() });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Hashing
// ============================================================================

/// Hashes `value` after canonicalizing it to JSON.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] if `value` cannot be canonicalized.
pub fn hash_canonical_json<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(hash_bytes(algorithm, &bytes))
}

/// Hashes `value` after canonicalizing it to JSON, rejecting payloads over
/// `limit` bytes.
///
/// # Errors
/// Returns [`HashError::Canonicalization`] on serialization failure, or
/// [`HashError::SizeLimitExceeded`] if the canonical payload is too large.
pub fn hash_canonical_json_with_limit<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
    limit: usize,
) -> Result<HashDigest, HashError> {
    let bytes = canonical_json_bytes_with_limit(value, limit)?;
    Ok(hash_bytes(algorithm, &bytes))
}

/// Hashes raw bytes with the given algorithm.
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> HashDigest {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            let digest = hasher.finalize();
            HashDigest::new(HashAlgorithm::Sha256, &digest)
        }
    }
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes `bytes` as lowercase hex.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
