// crates/olympus-gates/src/gates/odl.rs
// ============================================================================
// Module: Obligation Detection (ODL)
// Description: Twelfth and final gate; derives obligations from the
// necessary future, the temporal contract, and active invariants, and
// tracks their fulfillment windows.
// Purpose: Ensure required follow-up actions are never silently dropped.
// Dependencies: olympus_core::obligation, olympus_ledger::ObligationLedger
// ============================================================================

//! ## Overview
//! §4.15: obligations are derived from three sources — a
//! [`NecessaryFuture`]'s `required_actions` (plus an implicit
//! `SurvivabilityAction` obligation when `survivable_steps` is short), a
//! [`TemporalContract`] threshold entering its warning range, and an
//! [`Invariant`]'s `requires_action`. The window tracker marks an
//! obligation [`ObligationStatus::Violated`] the first step after its
//! deadline without having been fulfilled; a `Critical` obligation that is
//! violated, or still pending past its deadline, blocks all further
//! progress (§4.15, §7 "omission of CRITICAL/SYSTEM_ROOT obligation is
//! never recovered").

// ============================================================================
// SECTION: Imports
// ============================================================================

use olympus_core::AuthorityClass;
use olympus_core::Invariant;
use olympus_core::LedgerBackend;
use olympus_core::LedgerError;
use olympus_core::NecessaryFuture;
use olympus_core::Obligation;
use olympus_core::ObligationId;
use olympus_core::ObligationPriority;
use olympus_core::ObligationSource;
use olympus_core::ObligationStatus;
use olympus_core::TemporalContract;
use olympus_ledger::ObligationLedger;

/// Below this many surviving simulation steps, a necessary future implies
/// an implicit survivability obligation (§4.15).
pub const SHORT_SURVIVABILITY_THRESHOLD: u64 = 3;

/// Deadline, in run steps, granted to a survivability obligation.
pub const SURVIVABILITY_DEADLINE_STEPS: u64 = 1;

/// Fraction of a temporal contract's bound remaining at or below which a
/// threshold-warning obligation is derived (§4.15).
pub const CONTRACT_WARNING_RATIO: f64 = 0.1;

/// Derives every obligation implied by a necessary future: its declared
/// `required_actions`, plus an implicit survivability obligation when the
/// future's surviving step count is short.
#[must_use]
pub fn derive_from_future(
    future: &NecessaryFuture,
    current_step: u64,
    id_seed: &str,
) -> Vec<Obligation> {
    let mut obligations: Vec<Obligation> = future
        .required_actions
        .iter()
        .enumerate()
        .map(|(index, _)| Obligation {
            id: ObligationId::new(format!("{id_seed}::required::{index}")),
            deadline_step: current_step + 1,
            required_authority_class: AuthorityClass::Project,
            priority: ObligationPriority::Critical,
            protected_invariant: None,
            source: ObligationSource::NecessaryFuture,
            status: ObligationStatus::Pending,
        })
        .collect();

    if future.survivable_steps < SHORT_SURVIVABILITY_THRESHOLD {
        obligations.push(Obligation {
            id: ObligationId::new(format!("{id_seed}::survivability")),
            deadline_step: current_step + SURVIVABILITY_DEADLINE_STEPS,
            required_authority_class: AuthorityClass::Project,
            priority: ObligationPriority::Critical,
            protected_invariant: None,
            source: ObligationSource::SurvivabilityAction,
            status: ObligationStatus::Pending,
        });
    }

    obligations
}

/// Derives a threshold-warning obligation for each of a temporal
/// contract's bounds that the current state has entered the warning range
/// of (within [`CONTRACT_WARNING_RATIO`] of its limit).
#[must_use]
pub fn derive_from_contract(
    contract: &TemporalContract,
    runs_completed: u64,
    mutations_committed: u64,
    current_entropy: f64,
    current_step: u64,
    id_seed: &str,
) -> Vec<Obligation> {
    let mut obligations = Vec::new();

    let lifespan_ratio = ratio_remaining(runs_completed, contract.intended_lifespan);
    if lifespan_ratio <= CONTRACT_WARNING_RATIO {
        obligations.push(contract_obligation(id_seed, "lifespan", current_step));
    }

    let mutation_ratio = ratio_remaining(mutations_committed, contract.allowed_future_mutations);
    if mutation_ratio <= CONTRACT_WARNING_RATIO {
        obligations.push(contract_obligation(id_seed, "mutation_limit", current_step));
    }

    let drift = (current_entropy - contract.baseline_entropy).abs();
    let drift_ratio = if contract.max_entropy_drift <= 0.0 {
        1.0
    } else {
        1.0 - (drift / contract.max_entropy_drift).min(1.0)
    };
    if drift_ratio <= CONTRACT_WARNING_RATIO {
        obligations.push(contract_obligation(id_seed, "entropy_drift", current_step));
    }

    obligations
}

fn ratio_remaining(consumed: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    let consumed_f = consumed as f64;
    let limit_f = limit as f64;
    (1.0 - (consumed_f / limit_f)).max(0.0)
}

fn contract_obligation(id_seed: &str, bound: &str, current_step: u64) -> Obligation {
    Obligation {
        id: ObligationId::new(format!("{id_seed}::contract::{bound}")),
        deadline_step: current_step + 1,
        required_authority_class: AuthorityClass::Project,
        priority: ObligationPriority::Medium,
        protected_invariant: None,
        source: ObligationSource::TemporalContract,
        status: ObligationStatus::Pending,
    }
}

/// Derives an obligation from an invariant's `requires_action`, if it
/// declares one.
#[must_use]
pub fn derive_from_invariant(
    invariant: &Invariant,
    current_step: u64,
    deadline_offset: u64,
    id_seed: &str,
) -> Option<Obligation> {
    invariant.requires_action.as_ref()?;
    Some(Obligation {
        id: ObligationId::new(format!("{id_seed}::invariant::{}", invariant.id)),
        deadline_step: current_step + deadline_offset,
        required_authority_class: AuthorityClass::Constitutional,
        priority: ObligationPriority::Critical,
        protected_invariant: Some(invariant.id.clone()),
        source: ObligationSource::Invariant,
        status: ObligationStatus::Pending,
    })
}

/// ODL's verdict after advancing every tracked obligation to the current
/// step.
#[derive(Debug, Clone)]
pub struct OdlOutcome {
    /// Every obligation after advancing its window, including newly
    /// violated ones.
    pub advanced: Vec<Obligation>,
    /// `true` if any advanced obligation now blocks progress.
    pub blocks_progress: bool,
    /// `true` if any advanced obligation transitioned to `Violated` this
    /// step (an omission proof must be emitted for each).
    pub omission_detected: bool,
}

/// Advances every obligation's window to `current_step`, persists the
/// resulting states, and reports whether progress is blocked.
///
/// # Errors
/// Returns [`LedgerError`] if any advanced obligation cannot be appended.
pub fn evaluate(
    ledger: &mut ObligationLedger,
    obligations: &[Obligation],
    current_step: u64,
) -> Result<OdlOutcome, LedgerError> {
    let span = tracing::info_span!("odl.evaluate", current_step);
    let _guard = span.enter();

    let mut advanced = Vec::with_capacity(obligations.len());
    let mut blocks_progress = false;
    let mut omission_detected = false;

    for obligation in obligations {
        let next = obligation.advance(current_step);
        if matches!(next.status, ObligationStatus::Violated)
            && !matches!(obligation.status, ObligationStatus::Violated)
        {
            omission_detected = true;
            tracing::error!(
                obligation_id = %next.id,
                priority = ?next.priority,
                "obligation window closed without fulfillment"
            );
        }
        if next.blocks_progress(current_step) {
            blocks_progress = true;
        }
        ledger.append(next.clone())?;
        advanced.push(next);
    }

    Ok(OdlOutcome { advanced, blocks_progress, omission_detected })
}
