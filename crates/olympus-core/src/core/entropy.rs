// crates/olympus-core/src/core/entropy.rs
// ============================================================================
// Module: OLYMPUS Architectural Entropy
// Description: Entropy score, component breakdown, and phase classification.
// Purpose: Model AEC's fixed-weight entropy computation (§4.7).
// Dependencies: crate::core::fingerprint, serde
// ============================================================================

//! ## Overview
//! Entropy is a fixed-weight sum of four normalized components. Phase is a
//! fixed mapping from entropy to one of four discrete health states. Phase
//! is monotonic non-improving across runs unless MCCS convergence was
//! detected in the current run (see `DESIGN.md` open question #3).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::fingerprint::round_entropy;

// ============================================================================
// SECTION: Weights and Thresholds
// ============================================================================

/// Fixed weight for the `rsr_trend` entropy component.
pub const WEIGHT_RSR_TREND: f64 = 0.35;
/// Fixed weight for the `mortality_velocity` entropy component.
pub const WEIGHT_MORTALITY_VELOCITY: f64 = 0.25;
/// Fixed weight for the `singularity_density` entropy component.
pub const WEIGHT_SINGULARITY_DENSITY: f64 = 0.20;
/// Fixed weight for the `mccs_size` entropy component.
pub const WEIGHT_MCCS_SIZE: f64 = 0.20;

/// Upper bound (inclusive) of the [`Phase::Stable`] band.
pub const STABLE_MAX: f64 = 0.25;
/// Upper bound (inclusive) of the [`Phase::Decaying`] band.
pub const DECAYING_MAX: f64 = 0.50;
/// Upper bound (inclusive) of the [`Phase::Collapsing`] band; above this is
/// [`Phase::Dead`].
pub const COLLAPSING_MAX: f64 = 0.75;

// ============================================================================
// SECTION: Entropy Components
// ============================================================================

/// The four normalized inputs to the entropy formula, each in `[0, 1]`.
///
/// # Invariants
/// - `singularity_density` is clamped to `0.0` rather than going negative
///   (see `DESIGN.md` open question #2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyComponents {
    /// Normalized trend of per-shape RSR decline across recent runs.
    pub rsr_trend: f64,
    /// Normalized rate of shapes transitioning toward worse mortality
    /// status.
    pub mortality_velocity: f64,
    /// Normalized count of active singularities relative to history.
    pub singularity_density: f64,
    /// Normalized size of the most recently computed MCCS, if any.
    pub mccs_size: f64,
}

impl EntropyComponents {
    /// Builds a component set, clamping `singularity_density` to `[0, 1]`
    /// and every other component to `[0, 1]`.
    #[must_use]
    pub fn new(
        rsr_trend: f64,
        mortality_velocity: f64,
        singularity_density: f64,
        mccs_size: f64,
    ) -> Self {
        Self {
            rsr_trend: clamp01(rsr_trend),
            mortality_velocity: clamp01(mortality_velocity),
            singularity_density: clamp01(singularity_density),
            mccs_size: clamp01(mccs_size),
        }
    }

    /// Computes the weighted entropy score from these components, rounded
    /// for fingerprint stability.
    #[must_use]
    pub fn weighted_score(&self) -> f64 {
        let raw = self.rsr_trend * WEIGHT_RSR_TREND
            + self.mortality_velocity * WEIGHT_MORTALITY_VELOCITY
            + self.singularity_density * WEIGHT_SINGULARITY_DENSITY
            + self.mccs_size * WEIGHT_MCCS_SIZE;
        round_entropy(raw)
    }
}

/// Clamps a value into `[0.0, 1.0]`.
fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

// ============================================================================
// SECTION: Phase
// ============================================================================

/// Discrete architectural health state.
///
/// # Invariants
/// - Ordered `Stable < Decaying < Collapsing < Dead`; `Dead` is absorbing
///   (see `crate::core::entropy::classify_phase` and the phase-monotonicity
///   universal property in spec §8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Entropy `<= STABLE_MAX`; action CONTINUE.
    Stable,
    /// Entropy `<= DECAYING_MAX`; action MCCS_MANDATORY.
    Decaying,
    /// Entropy `<= COLLAPSING_MAX`; action READ_ONLY.
    Collapsing,
    /// Entropy `> COLLAPSING_MAX`; action PERMANENT_HALT. Absorbing.
    Dead,
}

impl Phase {
    /// Classifies a raw entropy score into its fixed phase band.
    #[must_use]
    pub fn from_entropy(entropy: f64) -> Self {
        if entropy <= STABLE_MAX {
            Self::Stable
        } else if entropy <= DECAYING_MAX {
            Self::Decaying
        } else if entropy <= COLLAPSING_MAX {
            Self::Collapsing
        } else {
            Self::Dead
        }
    }

    /// Applies the monotonicity rule: the phase may only improve (move
    /// earlier in the `Stable < Decaying < Collapsing < Dead` order) if
    /// `mccs_convergence_detected` is `true`; otherwise it may only stay
    /// the same or worsen. Once `Dead`, always `Dead`.
    #[must_use]
    pub fn apply_monotonicity(
        previous: Self,
        candidate: Self,
        mccs_convergence_detected: bool,
    ) -> Self {
        if previous == Self::Dead {
            return Self::Dead;
        }
        if candidate < previous && !mccs_convergence_detected {
            return previous;
        }
        candidate
    }
}

// ============================================================================
// SECTION: Entropy State
// ============================================================================

/// A snapshot of entropy for one run, persisted to `entropy.json` (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyState {
    /// The weighted entropy score for this run.
    pub value: f64,
    /// The phase this run's entropy maps to, after monotonicity is applied.
    pub phase: Phase,
    /// The raw components the score was computed from.
    pub components: EntropyComponents,
}

impl EntropyState {
    /// Computes a fresh entropy state from components and the previous
    /// run's phase, applying the monotonicity rule.
    #[must_use]
    pub fn compute(
        components: EntropyComponents,
        previous_phase: Option<Phase>,
        mccs_convergence_detected: bool,
    ) -> Self {
        let value = components.weighted_score();
        let candidate_phase = Phase::from_entropy(value);
        let phase = match previous_phase {
            Some(previous) => {
                Phase::apply_monotonicity(previous, candidate_phase, mccs_convergence_detected)
            }
            None => candidate_phase,
        };
        Self { value, phase, components }
    }
}
