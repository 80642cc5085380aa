// crates/olympus-core/src/core/authority.rs
// ============================================================================
// Module: OLYMPUS Authority & Invariants
// Description: Authority hierarchy and declared invariant supremacy levels.
// Purpose: Model AAM's refutation-authorization rules (§4.14).
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Authority forms a strict total order `USER < PROJECT < CONSTITUTIONAL <
//! SYSTEM_ROOT`. Refutation requires the refuter's level to be at least the
//! refuted level, and the refuter's class to appear in the invariant's
//! `refutable_by` set. Supremacy level 1 invariants are unrefutable by any
//! authority, including `SYSTEM_ROOT`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::InvariantId;

// ============================================================================
// SECTION: Authority Class
// ============================================================================

/// The authority level of a proof submitter or refuter.
///
/// # Invariants
/// - Totally ordered `User(1) < Project(2) < Constitutional(3) <
///   SystemRoot(4)`; the discriminant is the numeric level referenced by
///   spec §4.14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityClass {
    /// Level 1. An individual end user.
    User = 1,
    /// Level 2. A project-scoped authority (e.g. a project owner).
    Project = 2,
    /// Level 3. A constitutional authority (organization-wide policy).
    Constitutional = 3,
    /// Level 4. The system root authority.
    SystemRoot = 4,
}

impl AuthorityClass {
    /// Returns the numeric authority level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// SECTION: Invariant
// ============================================================================

/// A category a declared invariant belongs to.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvariantCategory {
    /// A structural invariant over shape attributes.
    Structural,
    /// A temporal invariant over contract/budget bounds.
    Temporal,
    /// A causal invariant over intent/cone alignment.
    Causal,
    /// An authority invariant over refutation rules themselves.
    Authority,
}

/// Supremacy level at or below which an invariant is unrefutable by any
/// authority, including [`AuthorityClass::SystemRoot`].
pub const UNREFUTABLE_SUPREMACY_LEVEL: u8 = 1;

/// A declared invariant with its refutation rules.
///
/// # Invariants
/// - `supremacy_level == UNREFUTABLE_SUPREMACY_LEVEL` makes the invariant
///   unrefutable regardless of `refutable_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invariant {
    /// Identifier for this invariant.
    pub id: InvariantId,
    /// The category this invariant belongs to.
    pub category: InvariantCategory,
    /// Supremacy level; `1` is unrefutable by any authority.
    pub supremacy_level: u8,
    /// Authority classes permitted to refute this invariant, when its
    /// supremacy level allows refutation at all.
    pub refutable_by: Vec<AuthorityClass>,
    /// A required follow-up action this invariant mandates when active,
    /// surfaced by ODL as an obligation.
    pub requires_action: Option<String>,
}

impl Invariant {
    /// Returns `true` if `refuter` may refute this invariant at
    /// `refuted_level`, applying both the supremacy-level gate and the
    /// `refuter_level >= refuted_level` rule (§4.14).
    #[must_use]
    pub fn refutable_by_authority(
        &self,
        refuter: AuthorityClass,
        refuted_level: AuthorityClass,
    ) -> bool {
        if self.supremacy_level <= UNREFUTABLE_SUPREMACY_LEVEL {
            return false;
        }
        refuter.level() >= refuted_level.level() && self.refutable_by.contains(&refuter)
    }
}
