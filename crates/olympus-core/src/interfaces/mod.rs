// crates/olympus-core/src/interfaces/mod.rs
// ============================================================================
// Module: OLYMPUS Backend Interfaces
// Description: Backend-agnostic traits implemented by storage crates.
// Purpose: Decouple gate logic from the concrete ledger persistence mechanism.
// Dependencies: crate::core::{fingerprint, identifiers}, serde, thiserror
// ============================================================================

//! ## Overview
//! `olympus-core` defines the shape of an append-only ledger; `olympus-ledger`
//! implements it over line-delimited JSON files (§4.2, §9 "append-only
//! ledgers with hash chaining"). Keeping the trait here lets gate code in
//! `olympus-gates` depend only on `olympus-core`, never on a concrete
//! storage crate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::FingerprintSerializationError;
use crate::core::identifiers::LedgerIndex;

// ============================================================================
// SECTION: Ledger Entry
// ============================================================================

/// One hash-chained entry in an append-only ledger.
///
/// # Invariants
/// - `index` is strictly increasing within a single ledger.
/// - `previous_entry_hash` is `None` iff `index == LedgerIndex::FIRST`.
/// - `entry_hash` is the fingerprint of `(index, payload,
///   previous_entry_hash)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry<T> {
    /// This entry's position in the ledger.
    pub index: LedgerIndex,
    /// The hash of the entry immediately preceding this one, if any.
    pub previous_entry_hash: Option<Fingerprint>,
    /// This entry's own content hash.
    pub entry_hash: Fingerprint,
    /// The entry's payload.
    pub payload: T,
}

// ============================================================================
// SECTION: Verification Result
// ============================================================================

/// The result of walking a ledger's hash chain end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// `true` if every entry's hash chain link is intact.
    pub ok: bool,
    /// The index of the first broken link, if any.
    pub first_break_index: Option<LedgerIndex>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure modes of a ledger backend.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The entry's payload could not be hashed.
    #[error("failed to hash ledger entry: {0}")]
    Hashing(#[from] FingerprintSerializationError),
    /// The underlying durable store could not be read or written.
    #[error("ledger io failure: {0}")]
    Io(String),
    /// The persisted ledger file was not valid for this ledger's payload
    /// type.
    #[error("ledger contains a malformed entry at index {index}: {reason}")]
    Malformed {
        /// The index of the malformed entry.
        index: u64,
        /// A description of why the entry was rejected.
        reason: String,
    },
    /// A durable-storage write failed after exhausting its bounded retry
    /// budget (§7 `LEDGER_WRITE_FAILED`).
    #[error("ledger write failed after exhausting retries")]
    WriteFailed,
}

// ============================================================================
// SECTION: Ledger Backend
// ============================================================================

/// A generic append-only ledger backend (§4.2).
///
/// Implementors guarantee single-writer discipline per ledger (§5): no two
/// concurrent callers observe interleaved appends. Readers never take a
/// lock; they see a monotonic, possibly-stale snapshot of the chain (§9).
pub trait LedgerBackend<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Rehydrates the ledger from durable storage, recomputing
    /// `next_index` from the highest persisted entry.
    ///
    /// # Errors
    /// Returns [`LedgerError`] if the durable store cannot be read or
    /// contains malformed entries.
    fn load(&mut self) -> Result<(), LedgerError>;

    /// Appends a new entry, assigning it the next monotonic index,
    /// computing its `previous_entry_hash` from the current tip, computing
    /// its own `entry_hash`, and durably flushing before returning.
    ///
    /// # Errors
    /// Returns [`LedgerError`] if hashing or the durable flush fails.
    fn append(&mut self, payload: T) -> Result<LedgerEntry<T>, LedgerError>;

    /// Re-walks the full chain, recomputing every entry's hash and
    /// comparing it against the persisted `entry_hash` and the next
    /// entry's `previous_entry_hash`. Never repairs a detected break.
    ///
    /// # Errors
    /// Returns [`LedgerError`] if the durable store cannot be read.
    fn verify(&self) -> Result<VerifyReport, LedgerError>;

    /// The number of entries currently in the ledger.
    fn len(&self) -> u64;

    /// Returns `true` if the ledger has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
