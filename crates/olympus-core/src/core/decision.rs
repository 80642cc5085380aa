// crates/olympus-core/src/core/decision.rs
// ============================================================================
// Module: OLYMPUS Decision Proof
// Description: The canonical decision artifact and its causal chain.
// Purpose: Model §3's OlympusDecisionProof and §6's error identifiers.
// Dependencies: crate::core::*, serde, thiserror
// ============================================================================

//! ## Overview
//! `OlympusDecisionProof` is the canonical output of a pipeline run: exactly
//! one decision, at most one primary violated invariant, a minimal causal
//! chain, a list of forbidden-alternative fingerprints, and a SHA-256 proof
//! hash linked to its parent proofs. `immutable = true` by contract — this
//! module never exposes a mutation path for an already-built proof.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::authority::AuthorityClass;
use crate::core::entropy::EntropyState;
use crate::core::fingerprint::fingerprint;
use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::FingerprintSerializationError;
use crate::core::identifiers::InvariantId;
use crate::core::identifiers::LedgerIndex;
use crate::core::identifiers::RunId;
use crate::core::necessity::NecessaryFuture;

// ============================================================================
// SECTION: Decision
// ============================================================================

/// The final verdict of a pipeline run.
///
/// # Invariants
/// - Exactly one of these four values is ever attached to a run; there is
///   no "soft" enforcement mode (spec §1 Non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The action may proceed.
    Allow,
    /// The action is rejected outright.
    Block,
    /// The project may only accept read-only actions going forward.
    ReadOnly,
    /// The project may never again accept a mutation. Irreversible.
    PermanentReadOnly,
}

/// Stable error identifiers surfaced at the run boundary (§6).
///
/// # Invariants
/// - Variants are stable for serialization and cross-system matching; this
///   is part of the external contract (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum OlympusErrorId {
    /// No temporal contract exists for the project.
    #[error("missing temporal contract")]
    MissingContract,
    /// The entropy budget has no remaining allocation.
    #[error("no entropy budget remains")]
    NoBudget,
    /// The entropy budget cannot afford the attempted action's cost.
    #[error("insufficient entropy budget for this action")]
    InsufficientBudget,
    /// The project's intended lifespan has been exceeded.
    #[error("intended lifespan exceeded")]
    LifespanExceeded,
    /// The project's allowed future-mutation count has been exceeded.
    #[error("mutation limit exceeded")]
    MutationLimitExceeded,
    /// Entropy has drifted beyond the contract's allowed bound.
    #[error("entropy drift exceeded contract bound")]
    EntropyDriftExceeded,
    /// The necessary future's constraints would be violated.
    #[error("future violation")]
    FutureViolation,
    /// A decision singularity's forbidden set matched this action.
    #[error("singularity breach")]
    SingularityBreach,
    /// A reality lock was violated.
    #[error("reality lock violated")]
    RealityLockViolated,
    /// Inevitability of collapse was proven for this action.
    #[error("inevitability proven")]
    InevitabilityProven,
    /// No survivable future exists for this action.
    #[error("extinction detected")]
    ExtinctionDetected,
    /// An intent was rejected by ICE.
    #[error("intent rejected")]
    IntentRejected,
    /// A hard precedent conflict was not refuted.
    #[error("precedent unrefuted")]
    PrecedentUnrefuted,
    /// The submitter's authority is insufficient for the requested
    /// refutation.
    #[error("insufficient authority")]
    InsufficientAuthority,
    /// A critical obligation was violated.
    #[error("obligation violated")]
    ObligationViolated,
}

// ============================================================================
// SECTION: Causal Chain
// ============================================================================

/// One step in a proof's causal chain: which gate produced which event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalChainStep {
    /// The gate (or sub-component) that produced this event.
    pub source_layer: String,
    /// A human-readable description of what happened.
    pub event: String,
}

impl CausalChainStep {
    /// Builds a causal chain step.
    #[must_use]
    pub fn new(source_layer: impl Into<String>, event: impl Into<String>) -> Self {
        Self { source_layer: source_layer.into(), event: event.into() }
    }
}

// ============================================================================
// SECTION: Decision Proof
// ============================================================================

/// The canonical decision artifact produced by exactly one pipeline run.
///
/// # Invariants
/// - `immutable = true` by contract: no method on this type mutates a
///   built proof in place.
/// - `proof_hash` equals `hash(canonicalize(self \ {proof_hash}))` (spec §8
///   universal property); computed once by [`OlympusDecisionProof::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlympusDecisionProof {
    /// The run this proof was produced for.
    pub run_id: RunId,
    /// The fingerprint of the attempted action's signature.
    pub action_fingerprint: Fingerprint,
    /// The final decision.
    pub final_decision: Decision,
    /// The single primary invariant violated, if any.
    pub primary_invariant_violated: Option<InvariantId>,
    /// The minimal causal chain explaining the decision.
    pub causal_chain: Vec<CausalChainStep>,
    /// Fingerprints of alternatives this proof forbids going forward.
    pub forbidden_alternatives: Vec<Fingerprint>,
    /// A summary of the necessary future computed for this run, if IE
    /// proved inevitability.
    pub necessary_future_summary: Option<NecessaryFutureSummary>,
    /// The entropy snapshot for this run.
    pub entropy_state: EntropyState,
    /// A summary of the project's temporal contract at this run.
    pub temporal_contract_summary: TemporalContractSummary,
    /// Hashes of the parent proofs this proof is chained from.
    pub parent_proof_hashes: Vec<Fingerprint>,
    /// Prior proof hashes whose hard precedent this proof successfully
    /// refuted.
    pub refuted_precedents: Vec<Fingerprint>,
    /// The authority class under which this proof was attested.
    pub authority_class: AuthorityClass,
    /// The supremacy level of `primary_invariant_violated`, if any.
    pub invariant_supremacy_level: Option<u8>,
    /// The index this proof occupies in the proof ledger.
    pub ledger_index: LedgerIndex,
    /// The content hash of this proof, excluding itself.
    pub proof_hash: Fingerprint,
    /// A hash entangling this proof with the attestation log's tip at the
    /// time it was attested.
    pub continuity_hash: Fingerprint,
}

/// A summary of a necessary future, embedded in a proof without the full
/// candidate-selection detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NecessaryFutureSummary {
    /// The doomed fingerprint this future was computed for.
    pub doomed_fingerprint: Fingerprint,
    /// The selected MCCS's content-addressed id.
    pub mccs_id: Fingerprint,
    /// Whether the deterministic tie-break was exercised.
    pub tie_recorded: bool,
}

/// A summary of a project's temporal contract, embedded in a proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalContractSummary {
    /// Remaining entropy budget ratio at the time of this run.
    pub remaining_budget_ratio: f64,
    /// Whether the budget has reached its irreversible read-only state.
    pub permanently_read_only: bool,
}

/// Inputs required to build an [`OlympusDecisionProof`], everything except
/// the proof hash and continuity hash, which are derived.
#[derive(Debug, Clone)]
pub struct ProofInputs {
    /// The run this proof is for.
    pub run_id: RunId,
    /// The attempted action's fingerprint.
    pub action_fingerprint: Fingerprint,
    /// The final decision.
    pub final_decision: Decision,
    /// The single primary invariant violated, if any.
    pub primary_invariant_violated: Option<InvariantId>,
    /// The causal chain explaining the decision.
    pub causal_chain: Vec<CausalChainStep>,
    /// Forbidden alternative fingerprints.
    pub forbidden_alternatives: Vec<Fingerprint>,
    /// A necessary-future summary, if IE proved inevitability.
    pub necessary_future_summary: Option<NecessaryFutureSummary>,
    /// The entropy state for this run.
    pub entropy_state: EntropyState,
    /// The temporal contract summary for this run.
    pub temporal_contract_summary: TemporalContractSummary,
    /// Parent proof hashes.
    pub parent_proof_hashes: Vec<Fingerprint>,
    /// Refuted precedent hashes.
    pub refuted_precedents: Vec<Fingerprint>,
    /// The submitter's authority class.
    pub authority_class: AuthorityClass,
    /// Supremacy level of `primary_invariant_violated`, if any.
    pub invariant_supremacy_level: Option<u8>,
    /// The ledger index this proof will occupy.
    pub ledger_index: LedgerIndex,
    /// The attestation log tip hash at build time, entangled into
    /// `continuity_hash`.
    pub attestation_tip_hash: Fingerprint,
}

impl OlympusDecisionProof {
    /// Builds a proof, computing `proof_hash` over every field except
    /// itself and `continuity_hash` over `(proof_hash, attestation_tip_hash)`.
    ///
    /// # Errors
    /// Returns [`FingerprintSerializationError`] only if the proof's fields
    /// cannot be serialized.
    pub fn build(inputs: ProofInputs) -> Result<Self, FingerprintSerializationError> {
        #[derive(Serialize)]
        struct Hashable<'a> {
            run_id: &'a RunId,
            action_fingerprint: &'a Fingerprint,
            final_decision: Decision,
            primary_invariant_violated: &'a Option<InvariantId>,
            causal_chain: &'a [CausalChainStep],
            forbidden_alternatives: &'a [Fingerprint],
            necessary_future_summary: &'a Option<NecessaryFutureSummary>,
            entropy_state: &'a EntropyState,
            temporal_contract_summary: &'a TemporalContractSummary,
            parent_proof_hashes: &'a [Fingerprint],
            refuted_precedents: &'a [Fingerprint],
            authority_class: AuthorityClass,
            invariant_supremacy_level: Option<u8>,
            ledger_index: &'a LedgerIndex,
        }

        let proof_hash = fingerprint(&Hashable {
            run_id: &inputs.run_id,
            action_fingerprint: &inputs.action_fingerprint,
            final_decision: inputs.final_decision,
            primary_invariant_violated: &inputs.primary_invariant_violated,
            causal_chain: &inputs.causal_chain,
            forbidden_alternatives: &inputs.forbidden_alternatives,
            necessary_future_summary: &inputs.necessary_future_summary,
            entropy_state: &inputs.entropy_state,
            temporal_contract_summary: &inputs.temporal_contract_summary,
            parent_proof_hashes: &inputs.parent_proof_hashes,
            refuted_precedents: &inputs.refuted_precedents,
            authority_class: inputs.authority_class,
            invariant_supremacy_level: inputs.invariant_supremacy_level,
            ledger_index: &inputs.ledger_index,
        })?;

        #[derive(Serialize)]
        struct ContinuityInput<'a> {
            proof_hash: &'a Fingerprint,
            attestation_tip_hash: &'a Fingerprint,
        }
        let continuity_hash = fingerprint(&ContinuityInput {
            proof_hash: &proof_hash,
            attestation_tip_hash: &inputs.attestation_tip_hash,
        })?;

        Ok(Self {
            run_id: inputs.run_id,
            action_fingerprint: inputs.action_fingerprint,
            final_decision: inputs.final_decision,
            primary_invariant_violated: inputs.primary_invariant_violated,
            causal_chain: inputs.causal_chain,
            forbidden_alternatives: inputs.forbidden_alternatives,
            necessary_future_summary: inputs.necessary_future_summary,
            entropy_state: inputs.entropy_state,
            temporal_contract_summary: inputs.temporal_contract_summary,
            parent_proof_hashes: inputs.parent_proof_hashes,
            refuted_precedents: inputs.refuted_precedents,
            authority_class: inputs.authority_class,
            invariant_supremacy_level: inputs.invariant_supremacy_level,
            ledger_index: inputs.ledger_index,
            proof_hash,
            continuity_hash,
        })
    }

    /// A synthesized human-readable abort reason from the causal chain
    /// (§7 "any downstream caller sees ... a human-readable `abortReason`").
    #[must_use]
    pub fn abort_reason(&self) -> Option<String> {
        if matches!(self.final_decision, Decision::Allow) {
            return None;
        }
        let joined = self
            .causal_chain
            .iter()
            .map(|step| format!("{}: {}", step.source_layer, step.event))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }
}
