// crates/olympus-core/src/core/mod.rs
// ============================================================================
// Module: OLYMPUS Core Data Model
// Description: Submodule declarations and re-exports for the data model.
// Purpose: Single entry point for every structural type the gates operate on.
// ============================================================================

pub mod action;
pub mod authority;
pub mod causal;
pub mod contract;
pub mod decision;
pub mod entropy;
pub mod fingerprint;
pub mod hashing;
pub mod identifiers;
pub mod intervention;
pub mod manifest;
pub mod mortality;
pub mod necessity;
pub mod obligation;
pub mod shape;
pub mod singularity;
pub mod tier;
pub mod time;
pub mod trace;

pub use action::ActionSignature;
pub use action::ActionType;
pub use action::AttemptedAction;
pub use action::ChangeDirection;
pub use authority::AuthorityClass;
pub use authority::Invariant;
pub use authority::InvariantCategory;
pub use causal::CausalFingerprintRecord;
pub use causal::FingerprintVerdict;
pub use contract::BudgetState;
pub use contract::EntropyBudget;
pub use contract::TemporalContract;
pub use decision::CausalChainStep;
pub use decision::Decision;
pub use decision::NecessaryFutureSummary;
pub use decision::OlympusDecisionProof;
pub use decision::OlympusErrorId;
pub use decision::ProofInputs;
pub use decision::TemporalContractSummary;
pub use entropy::EntropyComponents;
pub use entropy::EntropyState;
pub use entropy::Phase;
pub use fingerprint::fingerprint;
pub use fingerprint::round_entropy;
pub use fingerprint::round_survivability;
pub use fingerprint::Fingerprint;
pub use fingerprint::FingerprintSerializationError;
pub use hashing::canonical_json_bytes;
pub use hashing::canonical_json_bytes_with_limit;
pub use hashing::hash_bytes;
pub use hashing::hash_canonical_json;
pub use hashing::hash_canonical_json_with_limit;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::ActionId;
pub use identifiers::AgentId;
pub use identifiers::AttestationId;
pub use identifiers::HandoffId;
pub use identifiers::IntentId;
pub use identifiers::InvariantId;
pub use identifiers::LedgerIndex;
pub use identifiers::ObligationId;
pub use identifiers::ProjectId;
pub use identifiers::RunId;
pub use identifiers::ShapeId;
pub use identifiers::SingularityId;
pub use identifiers::StageId;
pub use intervention::Intervention;
pub use intervention::InterventionType;
pub use intervention::Mccs;
pub use intervention::MccsRankingKey;
pub use manifest::LedgerName;
pub use manifest::LedgerTouch;
pub use manifest::OlympusRunManifest;
pub use mortality::classify;
pub use mortality::MortalityRecord;
pub use mortality::MortalityStatus;
pub use necessity::select as select_necessary_future;
pub use necessity::CandidateFuture;
pub use necessity::NecessaryFuture;
pub use obligation::Obligation;
pub use obligation::ObligationPriority;
pub use obligation::ObligationSource;
pub use obligation::ObligationStatus;
pub use shape::Criticality;
pub use shape::Shape;
pub use shape::ShapeKind;
pub use singularity::enforce as enforce_singularities;
pub use singularity::DecisionSingularity;
pub use singularity::RealityDeviation;
pub use time::Timestamp;
pub use trace::HandoffDiff;
pub use trace::LossClass;
pub use trace::ShapeTraceResult;
pub use trace::SurvivalStatus;
