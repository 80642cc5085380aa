// crates/olympus-core/src/core/identifiers.rs
// ============================================================================
// Module: OLYMPUS Identifiers
// Description: Canonical opaque identifiers for runs, shapes, ledgers, and proofs.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers throughout OLYMPUS are opaque strings (UUID-like) or
//! monotonic ledger indices. Ordering is always by monotonic ledger index,
//! never by wall-clock — see `crate::core::time`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: String-Backed Opaque Identifiers
// ============================================================================

macro_rules! opaque_string_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        ///
        /// # Invariants
        /// - Opaque UTF-8 string; no normalization or validation is applied by this type.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new `", stringify!($name), "`.")]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_string_id!(ProjectId, "Project identifier scoping all project-owned ledgers.");
opaque_string_id!(RunId, "Identifier for a single pipeline execution attempt.");
opaque_string_id!(ShapeId, "Identifier for a shape that must survive the agent pipeline.");
opaque_string_id!(ActionId, "Identifier for an attempted action submitted to the pipeline.");
opaque_string_id!(InvariantId, "Identifier for a declared invariant.");
opaque_string_id!(ObligationId, "Identifier for a derived obligation.");
opaque_string_id!(AttestationId, "Identifier for an attestation log entry.");
opaque_string_id!(IntentId, "Identifier for an incoming intent evaluated by ICE.");
opaque_string_id!(AgentId, "Identifier for an upstream pipeline agent.");
opaque_string_id!(SingularityId, "Identifier for a decision singularity.");

// ============================================================================
// SECTION: Fixed Enumerated Identifiers
// ============================================================================

/// The fixed set of pipeline stages the upstream agent pipeline reports
/// trace results for.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - The stage set never grows or shrinks at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    /// Requirements intake stage.
    Intake,
    /// Design/decomposition stage.
    Design,
    /// Implementation stage.
    Implementation,
    /// Review/synthesis stage.
    Review,
    /// Delivery/packaging stage.
    Delivery,
}

/// The fixed set of directed edges between adjacent pipeline stages.
///
/// # Invariants
/// - Exactly five handoffs exist; each has a fixed `source`/`target` pair
///   given by [`HandoffId::endpoints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffId {
    /// Intake to design.
    H1,
    /// Design to implementation.
    H2,
    /// Implementation to review.
    H3,
    /// Review to delivery.
    H4,
    /// Intake to delivery (direct fast-path handoff).
    H5,
}

impl HandoffId {
    /// All handoffs, in fixed declaration order.
    pub const ALL: [Self; 5] = [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5];

    /// Returns the fixed `(source, target)` stage pair for this handoff.
    #[must_use]
    pub const fn endpoints(self) -> (StageId, StageId) {
        match self {
            Self::H1 => (StageId::Intake, StageId::Design),
            Self::H2 => (StageId::Design, StageId::Implementation),
            Self::H3 => (StageId::Implementation, StageId::Review),
            Self::H4 => (StageId::Review, StageId::Delivery),
            Self::H5 => (StageId::Intake, StageId::Delivery),
        }
    }
}

// ============================================================================
// SECTION: Ledger Index
// ============================================================================

/// A monotonic, per-ledger append index.
///
/// # Invariants
/// - Strictly increasing within a single ledger.
/// - Never reused, even after a verify failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerIndex(u64);

impl LedgerIndex {
    /// The index of the first entry ever appended to a ledger.
    pub const FIRST: Self = Self(0);

    /// Creates a ledger index from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the next index in sequence.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for LedgerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
