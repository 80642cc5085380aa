// crates/olympus-core/src/core/time.rs
// ============================================================================
// Module: OLYMPUS Time Model
// Description: Canonical timestamp representation for host-supplied run events.
// Purpose: Keep gate evaluation deterministic and replayable.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! OLYMPUS embeds explicit time values supplied by the host in run inputs and
//! ledger entries. No gate reads wall-clock time directly, and no timestamp
//! ever participates in a fingerprint (see `crate::core::fingerprint`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp attached to ledger entries and run records.
///
/// # Invariants
/// - Values are explicitly provided by the host; no gate or core function
///   reads wall-clock time.
/// - Never included in a fingerprint's canonical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value, for hosts without wall-clock access.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }
}
