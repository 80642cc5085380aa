// crates/olympus-core/src/core/mortality.rs
// ============================================================================
// Module: OLYMPUS Shape Mortality
// Description: Per-shape historical survival tracking and status classification.
// Purpose: Turn a shape's run history into a deterministic mortality status.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A mortality record is a materialized view over the run-end history of a
//! single shape (see §9 "Mortality DB keyed by shape id" — treat it as a
//! fold over a log of run results rather than a mutable map). `classify` is
//! the pure function from a record to a [`MortalityStatus`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ShapeId;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Minimum overall survival rate for [`MortalityStatus::Healthy`].
pub const HEALTHY_THRESHOLD: f64 = 0.95;

/// Minimum overall survival rate for [`MortalityStatus::Flaky`]; below this
/// a shape is [`MortalityStatus::SystemicallyBroken`].
pub const FLAKY_THRESHOLD: f64 = 0.70;

/// Number of most-recent runs considered by the declining-trend check.
pub const TREND_WINDOW: usize = 5;

// ============================================================================
// SECTION: Mortality Status
// ============================================================================

/// Deterministic classification of a shape's historical survival.
///
/// # Invariants
/// - Computed solely by [`classify`] from a [`MortalityRecord`]; never set
///   directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MortalityStatus {
    /// Overall survival rate at or above [`HEALTHY_THRESHOLD`].
    Healthy,
    /// Overall survival rate between [`FLAKY_THRESHOLD`] and
    /// [`HEALTHY_THRESHOLD`].
    Flaky,
    /// Overall survival rate below [`FLAKY_THRESHOLD`].
    SystemicallyBroken,
    /// Survival rate is declining across the trend window, regardless of
    /// its absolute value. Takes precedence over the rate-based bands.
    Degrading,
}

// ============================================================================
// SECTION: Mortality Record
// ============================================================================

/// Per-shape run history.
///
/// # Invariants
/// - `trend` holds at most [`TREND_WINDOW`] most-recent survival rates,
///   oldest first.
/// - Created on first observation of the shape; updated only at run end;
///   never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityRecord {
    /// The shape this record tracks.
    pub shape_id: ShapeId,
    /// Total number of runs observed for this shape.
    pub total_runs: u64,
    /// Cumulative survival rate across all observed runs.
    pub overall_survival_rate: f64,
    /// Number of consecutive runs ending in death (RSR < 1.0 for an
    /// invariant shape, or tier non-compliance otherwise).
    pub consecutive_deaths: u64,
    /// Number of consecutive runs ending in full survival.
    pub consecutive_survivals: u64,
    /// Most recent per-run survival rates, oldest first, capped at
    /// [`TREND_WINDOW`] entries.
    pub trend: Vec<f64>,
}

impl MortalityRecord {
    /// Creates a fresh record for a shape observed for the first time.
    #[must_use]
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            total_runs: 0,
            overall_survival_rate: 1.0,
            consecutive_deaths: 0,
            consecutive_survivals: 0,
            trend: Vec::new(),
        }
    }

    /// Folds one more run's outcome into the record, returning the updated
    /// record. Never mutates history in place outside of this fold.
    #[must_use]
    pub fn observe(&self, survived: bool, run_rsr: f64) -> Self {
        let total_runs = self.total_runs + 1;
        let survived_runs_before =
            (self.overall_survival_rate * self.total_runs as f64).round();
        let survived_runs = survived_runs_before + f64::from(u8::from(survived));
        let overall_survival_rate = survived_runs / total_runs as f64;

        let mut trend = self.trend.clone();
        trend.push(run_rsr);
        if trend.len() > TREND_WINDOW {
            trend.remove(0);
        }

        let (consecutive_deaths, consecutive_survivals) = if survived {
            (0, self.consecutive_survivals + 1)
        } else {
            (self.consecutive_deaths + 1, 0)
        };

        Self {
            shape_id: self.shape_id.clone(),
            total_runs,
            overall_survival_rate,
            consecutive_deaths,
            consecutive_survivals,
            trend,
        }
    }

    /// Returns `true` if the trend window shows a strictly declining
    /// survival rate, regardless of its absolute value.
    #[must_use]
    pub fn is_declining(&self) -> bool {
        if self.trend.len() < 2 {
            return false;
        }
        self.trend.windows(2).all(|pair| pair[1] < pair[0])
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies a mortality record into its deterministic status.
///
/// Declining trend takes precedence over the absolute survival-rate bands:
/// a shape can have a high overall rate yet still be flagged as degrading.
#[must_use]
pub fn classify(record: &MortalityRecord) -> MortalityStatus {
    if record.is_declining() {
        return MortalityStatus::Degrading;
    }
    if record.overall_survival_rate >= HEALTHY_THRESHOLD {
        MortalityStatus::Healthy
    } else if record.overall_survival_rate >= FLAKY_THRESHOLD {
        MortalityStatus::Flaky
    } else {
        MortalityStatus::SystemicallyBroken
    }
}
