// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Typed ledger payloads.
//!
//! Every shape the reducer writes is a variant here. Field sets are
//! disjoint, so the untagged JSON form deserializes back to exactly one
//! variant.

use serde::{Deserialize, Serialize};

use crate::ambiguity::Interpretation;
use crate::artifacts::{BlueprintSpec, RefusalReport, VerificationPack};
use crate::canonical::{Canonical, CanonicalValue};
use crate::error::Result;
use crate::graph::{Edge, Node};
use crate::policy::Policy;
use crate::types::{ProposalSource, RecordKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedpackPayload {
    pub seed_text: String,
    pub seed_hash: String,
    pub pin: CanonicalValue,
    pub policy_summary: Policy,
    pub kernel_version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProposalPayload {
    pub source: ProposalSource,
    pub confidence: Option<f64>,
    pub interpretations: Vec<Interpretation>,
    pub proposal_hash: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpretationCommitPayload {
    pub interpretation: Interpretation,
    pub commit_hash: String,
    pub accepted_from: Option<String>,
}

/// Full content of the committed DAG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DagCommitPayload {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlueprintArtifactPayload {
    pub blueprint: BlueprintSpec,
    pub verification: VerificationPack,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefusalArtifactPayload {
    pub refusal: RefusalReport,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordPayload {
    Seedpack(SeedpackPayload),
    Proposal(ProposalPayload),
    InterpretationCommit(InterpretationCommitPayload),
    DagCommit(DagCommitPayload),
    Blueprint(BlueprintArtifactPayload),
    Refusal(RefusalArtifactPayload),
}

impl RecordPayload {
    /// The record kind this payload must be filed under.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordPayload::Seedpack(_) => RecordKind::Seedpack,
            RecordPayload::Proposal(_) => RecordKind::Proposal,
            RecordPayload::InterpretationCommit(_) | RecordPayload::DagCommit(_) => RecordKind::Commit,
            RecordPayload::Blueprint(_) | RecordPayload::Refusal(_) => RecordKind::Artifact,
        }
    }
}

impl Canonical for RecordPayload {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(match self {
            RecordPayload::Seedpack(p) => CanonicalValue::object([
                ("seed_text", CanonicalValue::from(p.seed_text.as_str())),
                ("seed_hash", CanonicalValue::from(p.seed_hash.as_str())),
                ("pin", p.pin.to_canonical()?),
                ("policy_summary", p.policy_summary.to_canonical()?),
                ("kernel_version", CanonicalValue::from(p.kernel_version.as_str())),
            ]),
            RecordPayload::Proposal(p) => CanonicalValue::object([
                ("source", p.source.to_canonical()?),
                ("confidence", p.confidence.to_canonical()?),
                ("interpretations", p.interpretations.to_canonical()?),
                ("proposal_hash", CanonicalValue::from(p.proposal_hash.as_str())),
            ]),
            RecordPayload::InterpretationCommit(p) => CanonicalValue::object([
                ("interpretation", p.interpretation.to_canonical()?),
                ("commit_hash", CanonicalValue::from(p.commit_hash.as_str())),
                ("accepted_from", CanonicalValue::from(p.accepted_from.as_deref())),
            ]),
            RecordPayload::DagCommit(p) => CanonicalValue::object([
                ("nodes", p.nodes.to_canonical()?),
                ("edges", p.edges.to_canonical()?),
            ]),
            RecordPayload::Blueprint(p) => CanonicalValue::object([
                ("blueprint", p.blueprint.to_canonical()?),
                ("verification", p.verification.to_canonical()?),
            ]),
            RecordPayload::Refusal(p) => {
                CanonicalValue::object([("refusal", p.refusal.to_canonical()?)])
            }
        })
    }
}
