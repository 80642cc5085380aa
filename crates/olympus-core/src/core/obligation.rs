// crates/olympus-core/src/core/obligation.rs
// ============================================================================
// Module: OLYMPUS Obligations
// Description: Required decisions with deadlines and their violation tracking.
// Purpose: Model ODL's derived obligations and omission proofs (§4.15).
// Dependencies: crate::core::{authority, identifiers}, serde
// ============================================================================

//! ## Overview
//! An obligation is a required decision derived from a [`NecessaryFuture`],
//! a [`TemporalContract`] threshold, or an [`Invariant`]'s `requires_action`.
//! It has a deadline step; the window tracker marks it `Violated` the first
//! step after the deadline without it having been `Fulfilled`.
//!
//! [`NecessaryFuture`]: crate::core::necessity::NecessaryFuture
//! [`TemporalContract`]: crate::core::contract::TemporalContract
//! [`Invariant`]: crate::core::authority::Invariant

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::authority::AuthorityClass;
use crate::core::identifiers::InvariantId;
use crate::core::identifiers::ObligationId;

// ============================================================================
// SECTION: Obligation Source
// ============================================================================

/// Which part of the data model derived an obligation.
///
/// # Invariants
/// - Variants are stable for serialization and causal-chain reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationSource {
    /// Derived from a `NecessaryFuture`'s `required_action` list.
    NecessaryFuture,
    /// Derived from a `NecessaryFuture`'s short survivable-steps warning.
    SurvivabilityAction,
    /// Derived from a temporal contract threshold (lifespan, mutation
    /// count, or entropy drift) entering its fixed warning range.
    TemporalContract,
    /// Derived from an invariant's `requires_action`.
    Invariant,
}

// ============================================================================
// SECTION: Obligation Status
// ============================================================================

/// Lifecycle status of an obligation.
///
/// # Invariants
/// - Transitions `Pending -> Fulfilled` or `Pending -> Violated`; never
///   reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationStatus {
    /// Awaiting fulfillment before its deadline step.
    Pending,
    /// Fulfilled at or before its deadline step.
    Fulfilled,
    /// Deadline step passed with no fulfillment recorded.
    Violated,
}

// ============================================================================
// SECTION: Priority
// ============================================================================

/// The severity of an obligation, used to decide whether the obligation
/// gate blocks progress.
///
/// # Invariants
/// - A `Critical` obligation that is `Violated` or still `Pending` past its
///   deadline blocks all further progress (§4.15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationPriority {
    /// Informational; tracked but never blocks.
    Low,
    /// Should be addressed; does not block by itself.
    Medium,
    /// Blocks progress once violated or once past deadline unaddressed.
    Critical,
}

// ============================================================================
// SECTION: Obligation
// ============================================================================

/// A required decision with a deadline, derived by ODL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    /// Identifier for this obligation.
    pub id: ObligationId,
    /// The run step by which this obligation must be fulfilled.
    pub deadline_step: u64,
    /// The minimum authority class required to fulfill this obligation.
    pub required_authority_class: AuthorityClass,
    /// Severity, used by the obligation gate to decide blocking.
    pub priority: ObligationPriority,
    /// The invariant this obligation protects, if any.
    pub protected_invariant: Option<InvariantId>,
    /// Where this obligation was derived from.
    pub source: ObligationSource,
    /// Current lifecycle status.
    pub status: ObligationStatus,
}

impl Obligation {
    /// Advances this obligation's status given the current run step,
    /// marking it `Violated` the first step after `deadline_step` if it is
    /// still `Pending`. Never reverses a `Fulfilled` or `Violated` status.
    #[must_use]
    pub fn advance(&self, current_step: u64) -> Self {
        let status = match self.status {
            ObligationStatus::Pending if current_step > self.deadline_step => {
                ObligationStatus::Violated
            }
            other => other,
        };
        Self { status, ..self.clone() }
    }

    /// Marks this obligation fulfilled. A no-op if already `Violated`.
    #[must_use]
    pub fn fulfill(&self) -> Self {
        if matches!(self.status, ObligationStatus::Violated) {
            return self.clone();
        }
        Self { status: ObligationStatus::Fulfilled, ..self.clone() }
    }

    /// Returns `true` if this obligation, in its current status, should
    /// block progress: a `Critical` obligation that is `Violated`, or
    /// `Critical` and `Pending` past its deadline.
    #[must_use]
    pub fn blocks_progress(&self, current_step: u64) -> bool {
        if !matches!(self.priority, ObligationPriority::Critical) {
            return false;
        }
        match self.status {
            ObligationStatus::Violated => true,
            ObligationStatus::Pending => current_step > self.deadline_step,
            ObligationStatus::Fulfilled => false,
        }
    }
}
