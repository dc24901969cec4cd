// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Terminal run artifacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canonical::{hash_canonical, Canonical, CanonicalValue};
use crate::config::{BLUEPRINT_INVARIANTS, REPLAY_INSTRUCTIONS};
use crate::error::Result;
use crate::types::NodeId;

pub const REFUSED: &str = "refused";

/// Key of the blueprint hash in [`VerificationPack::artifact_hashes`].
pub const BLUEPRINT_ARTIFACT: &str = "blueprint";

/// Primary output of a converged run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlueprintSpec {
    pub run_id: String,
    pub seed_hash: String,
    pub intent_root_node_id: NodeId,
    pub pinned_target: CanonicalValue,
    pub invariants: Vec<String>,
    pub module_contracts: Vec<CanonicalValue>,
}

impl BlueprintSpec {
    /// A blueprint declaring the standard invariants and no module contracts.
    pub fn new(
        run_id: impl Into<String>,
        seed_hash: impl Into<String>,
        intent_root_node_id: NodeId,
        pinned_target: CanonicalValue,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            seed_hash: seed_hash.into(),
            intent_root_node_id,
            pinned_target,
            invariants: BLUEPRINT_INVARIANTS.iter().map(|s| s.to_string()).collect(),
            module_contracts: Vec::new(),
        }
    }

    pub fn compute_hash(&self) -> Result<String> {
        hash_canonical(self)
    }
}

impl Canonical for BlueprintSpec {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("run_id", CanonicalValue::from(self.run_id.as_str())),
            ("seed_hash", CanonicalValue::from(self.seed_hash.as_str())),
            ("intent_root_node_id", self.intent_root_node_id.to_canonical()?),
            ("pinned_target", self.pinned_target.to_canonical()?),
            ("invariants", self.invariants.to_canonical()?),
            ("module_contracts", self.module_contracts.to_canonical()?),
        ]))
    }
}

/// Hash of `{ledger_last_hash, dag_root_hash, artifact_hashes}`.
pub fn summary_hash(
    ledger_last_hash: &str,
    dag_root_hash: &str,
    artifact_hashes: &BTreeMap<String, String>,
) -> Result<String> {
    hash_canonical(&CanonicalValue::object([
        ("ledger_last_hash", CanonicalValue::from(ledger_last_hash)),
        ("dag_root_hash", CanonicalValue::from(dag_root_hash)),
        ("artifact_hashes", artifact_hashes.to_canonical()?),
    ]))
}

/// Everything needed to re-verify a converged run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationPack {
    pub ledger_last_hash: String,
    pub dag_root_hash: String,
    pub artifact_hashes: BTreeMap<String, String>,
    pub expected_summary_hash: String,
    pub replay_instructions: String,
}

impl VerificationPack {
    /// Builds the pack and seals it with the summary hash.
    pub fn new(
        ledger_last_hash: impl Into<String>,
        dag_root_hash: impl Into<String>,
        artifact_hashes: BTreeMap<String, String>,
    ) -> Result<Self> {
        let ledger_last_hash = ledger_last_hash.into();
        let dag_root_hash = dag_root_hash.into();
        let expected_summary_hash = summary_hash(&ledger_last_hash, &dag_root_hash, &artifact_hashes)?;
        Ok(Self {
            ledger_last_hash,
            dag_root_hash,
            artifact_hashes,
            expected_summary_hash,
            replay_instructions: REPLAY_INSTRUCTIONS.to_string(),
        })
    }

    pub fn compute_summary_hash(&self) -> Result<String> {
        summary_hash(&self.ledger_last_hash, &self.dag_root_hash, &self.artifact_hashes)
    }
}

impl Canonical for VerificationPack {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("ledger_last_hash", CanonicalValue::from(self.ledger_last_hash.as_str())),
            ("dag_root_hash", CanonicalValue::from(self.dag_root_hash.as_str())),
            ("artifact_hashes", self.artifact_hashes.to_canonical()?),
            ("expected_summary_hash", CanonicalValue::from(self.expected_summary_hash.as_str())),
            ("replay_instructions", CanonicalValue::from(self.replay_instructions.as_str())),
        ]))
    }
}

/// Structured outcome of a run that declined to commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefusalReport {
    pub run_id: String,
    pub seed_hash: String,
    pub reason_codes: Vec<String>,
    pub evidence_record_hashes: Vec<String>,
    pub policy_suggestions: Vec<String>,
    pub status: String,
}

impl RefusalReport {
    pub fn new(
        run_id: impl Into<String>,
        seed_hash: impl Into<String>,
        reason_codes: Vec<String>,
        evidence_record_hashes: Vec<String>,
        policy_suggestions: Vec<String>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            seed_hash: seed_hash.into(),
            reason_codes,
            evidence_record_hashes,
            policy_suggestions,
            status: REFUSED.to_string(),
        }
    }

    pub fn is_refused(&self) -> bool {
        self.status == REFUSED
    }
}

impl Canonical for RefusalReport {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("run_id", CanonicalValue::from(self.run_id.as_str())),
            ("seed_hash", CanonicalValue::from(self.seed_hash.as_str())),
            ("reason_codes", self.reason_codes.to_canonical()?),
            ("evidence_record_hashes", self.evidence_record_hashes.to_canonical()?),
            ("policy_suggestions", self.policy_suggestions.to_canonical()?),
            ("status", CanonicalValue::from(self.status.as_str())),
        ]))
    }
}
