// crates/olympus-ledger/src/payloads.rs
// ============================================================================
// Module: Supplemental Ledger Payloads
// Description: Record shapes for the named ledgers that have no dedicated
// structural type in olympus-core.
// Purpose: Give FingerprintIndex, InevitabilityLedger, and IntentConeLedger a
// concrete, serializable payload.
// Dependencies: olympus_core, serde
// ============================================================================

//! ## Overview
//! `olympus-core` defines the structural vocabulary shared by every gate
//! (shapes, fingerprints, decisions, obligations, ...), but three of the
//! thirteen named ledgers persist a record shape that is purely about
//! *how that ledger is indexed*, not a structural record a gate reasons
//! about directly. Those three payload types live here instead of in
//! `olympus-core`.

use olympus_core::ActionId;
use olympus_core::Decision;
use olympus_core::Fingerprint;
use olympus_core::FingerprintVerdict;
use olympus_core::IntentId;
use olympus_core::RunId;
use serde::Deserialize;
use serde::Serialize;

/// One transform-hash-to-originating-run mapping, persisted to the
/// `fingerprints/<run>/` index so a later run can explain *why* a
/// fingerprint is forbidden, and so OCIC can look up a transform hash's
/// historical verdict before composing new candidates (§4.4 "predictive
/// blocks").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintIndexEntry {
    /// The fingerprint being indexed.
    pub fingerprint: Fingerprint,
    /// The run whose decision first produced this fingerprint.
    pub causing_run: RunId,
    /// The historical verdict recorded against this fingerprint.
    pub verdict: FingerprintVerdict,
}

/// One run's Inevitability Engine verdict, recorded to
/// `inevitability-history.json` for audit and counterfactual replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InevitabilityRecord {
    /// The run this verdict was reached for.
    pub run_id: RunId,
    /// The fingerprint of the action that was evaluated.
    pub action_fingerprint: Fingerprint,
    /// The final decision reached.
    pub decision: Decision,
    /// Fingerprints of alternatives ruled out as forbidden.
    pub forbidden_alternatives: Vec<Fingerprint>,
}

/// One Incoming Cone Evaluator verdict: whether an evaluated action fell
/// inside the intent cone an upstream agent declared, recorded to
/// `intent-cones.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentConeRecord {
    /// The intent whose cone was evaluated against.
    pub intent_id: IntentId,
    /// The action checked against that cone.
    pub evaluated_action: ActionId,
    /// `true` if the action fell within the declared cone.
    pub within_cone: bool,
}
