// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic replay.
//!
//! Rebuilds a run from its ledger records alone and re-derives every hash
//! the reducer produced. The proposer is never consulted: the recorded
//! proposal is the only source of interpretations.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::ambiguity::{collapse_proposal, Interpretation};
use crate::artifacts::{summary_hash, BLUEPRINT_ARTIFACT};
use crate::canonical::hash_canonical;
use crate::config::KernelConfig;
use crate::envelope::{commit::commit_hash, proposal::proposal_hash, Proposal};
use crate::error::{KernelError, Result};
use crate::graph::invariants::check_duplicate_node_ids;
use crate::graph::{Dag, Edge, Node};
use crate::ledger::{
    verify_chain, BlueprintArtifactPayload, DagCommitPayload, EvidenceRecord,
    InterpretationCommitPayload, ProposalPayload, RecordPayload, RefusalArtifactPayload,
    SeedpackPayload,
};
use crate::policy::{validate_policy, Policy};
use crate::refusal::{check_refusal_conditions, generate_policy_suggestions, RESOLVE_AMBIGUITY_FAILED};
use crate::state::reducer::build_dag;
use crate::state::RunOutcome;
use crate::types::NodeId;

/// One discrepancy between what a record claims and what replay derives.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ReplayMismatch {
    #[error("ledger recorded by kernel {recorded}, replayed with {running}")]
    KernelVersion { recorded: String, running: String },

    #[error("record {index}: {reason}")]
    Structure { index: usize, reason: String },

    #[error("record {index} belongs to run {recorded}, expected {expected}")]
    RunId {
        index: usize,
        recorded: String,
        expected: String,
    },

    #[error("{field} mismatch: recorded {recorded}, computed {computed}")]
    Hash {
        field: &'static str,
        recorded: String,
        computed: String,
    },

    #[error("collapse winner mismatch: recorded {recorded}, computed {computed}")]
    Winner { recorded: String, computed: String },

    #[error("refusal evidence does not match preceding records")]
    RefusalEvidence,

    #[error("commit recorded although the recorded policy refuses: {reasons:?}")]
    UnrefusedCommit { reasons: Vec<String> },

    #[error("refusal reasons mismatch: recorded {recorded:?}, computed {computed:?}")]
    RefusalReasons {
        recorded: Vec<String>,
        computed: Vec<String>,
    },

    #[error("refusal suggestions do not match the recorded reasons")]
    RefusalSuggestions,

    #[error("ledger has no terminal artifact")]
    MissingArtifact,
}

impl ReplayMismatch {
    fn hash(field: &'static str, recorded: &str, computed: &str) -> Option<Self> {
        (recorded != computed).then(|| ReplayMismatch::Hash {
            field,
            recorded: recorded.to_string(),
            computed: computed.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplayReport {
    pub run_id: String,
    pub record_count: usize,
    /// Hash of the final record, `None` for an empty ledger.
    pub ledger_last_hash: Option<String>,
    /// Kernel version found in the seedpack record.
    pub recorded_kernel_version: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub dag_root_hash: String,
    pub outcome: Option<RunOutcome>,
    /// Recomputed summary; only converged runs have one.
    pub summary_hash: Option<String>,
    pub matches_expected: bool,
    pub mismatches: Vec<ReplayMismatch>,
}

#[derive(Clone, Debug, Default)]
pub struct Replayer {
    config: KernelConfig,
}

impl Replayer {
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    /// Replays `records` for `run_id`.
    ///
    /// A broken hash chain is an error; every other discrepancy is collected
    /// in the report. DAG invariant violations in recorded content are also
    /// errors, since they mean the records describe an impossible graph.
    pub fn replay(&self, records: &[EvidenceRecord], run_id: &str) -> Result<ReplayReport> {
        verify_chain(records)?;

        let mut walk = Walk {
            config: &self.config,
            run_id,
            records,
            dag: Dag::new(run_id),
            seedpack: None,
            proposal: None,
            commit: None,
            expected_refusal: None,
            outcome: None,
            summary_hash: None,
            mismatches: Vec::new(),
        };
        for (index, record) in records.iter().enumerate() {
            walk.step(index, record)?;
        }
        if walk.outcome.is_none() {
            walk.mismatches.push(ReplayMismatch::MissingArtifact);
        }

        let matches_expected = walk.outcome.is_some() && walk.mismatches.is_empty();
        for mismatch in &walk.mismatches {
            warn!(run_id, %mismatch, "replay mismatch");
        }
        info!(run_id, records = records.len(), matches_expected, "replay finished");

        Ok(ReplayReport {
            run_id: run_id.to_string(),
            record_count: records.len(),
            ledger_last_hash: records.last().map(|r| r.record_hash.clone()),
            recorded_kernel_version: walk.seedpack.map(|s| s.kernel_version.clone()),
            dag_root_hash: walk.dag.root_hash()?,
            nodes: walk.dag.nodes().cloned().collect(),
            edges: walk.dag.edges().cloned().collect(),
            outcome: walk.outcome,
            summary_hash: walk.summary_hash,
            matches_expected,
            mismatches: walk.mismatches,
        })
    }
}

/// Replays with the default [`KernelConfig`].
pub fn replay_from_ledger(records: &[EvidenceRecord], run_id: &str) -> Result<ReplayReport> {
    Replayer::default().replay(records, run_id)
}

struct Walk<'a> {
    config: &'a KernelConfig,
    run_id: &'a str,
    records: &'a [EvidenceRecord],
    dag: Dag,
    seedpack: Option<&'a SeedpackPayload>,
    proposal: Option<&'a ProposalPayload>,
    commit: Option<&'a InterpretationCommitPayload>,
    /// Reasons the reducer would have refused with; empty when it converges.
    expected_refusal: Option<Vec<String>>,
    outcome: Option<RunOutcome>,
    summary_hash: Option<String>,
    mismatches: Vec<ReplayMismatch>,
}

impl<'a> Walk<'a> {
    fn structure(&mut self, index: usize, reason: impl Into<String>) {
        self.mismatches.push(ReplayMismatch::Structure {
            index,
            reason: reason.into(),
        });
    }

    fn check_hash(&mut self, field: &'static str, recorded: &str, computed: &str) {
        if let Some(m) = ReplayMismatch::hash(field, recorded, computed) {
            self.mismatches.push(m);
        }
    }

    fn check_run_id(&mut self, index: usize, recorded: &str) {
        if recorded != self.run_id {
            self.mismatches.push(ReplayMismatch::RunId {
                index,
                recorded: recorded.to_string(),
                expected: self.run_id.to_string(),
            });
        }
    }

    fn step(&mut self, index: usize, record: &'a EvidenceRecord) -> Result<()> {
        if self.outcome.is_some() {
            self.structure(index, "record after terminal artifact");
            return Ok(());
        }
        match &record.payload {
            RecordPayload::Seedpack(p) => self.seedpack(index, p),
            RecordPayload::Proposal(p) => self.proposal(index, p),
            RecordPayload::InterpretationCommit(p) => self.interpretation_commit(index, p),
            RecordPayload::DagCommit(p) => self.dag_commit(index, p),
            RecordPayload::Blueprint(p) => self.blueprint(index, record, p),
            RecordPayload::Refusal(p) => self.refusal(index, p),
        }
    }

    fn seedpack(&mut self, index: usize, p: &'a SeedpackPayload) -> Result<()> {
        if self.seedpack.is_some() {
            self.structure(index, "duplicate seedpack");
        }
        let computed = hash_canonical(p.seed_text.as_str())?;
        self.check_hash("seed_hash", &p.seed_hash, &computed);
        if p.kernel_version != self.config.kernel_version {
            self.mismatches.push(ReplayMismatch::KernelVersion {
                recorded: p.kernel_version.clone(),
                running: self.config.kernel_version.clone(),
            });
        }
        if let Err(err) = validate_policy(&p.policy_summary) {
            self.structure(index, format!("recorded policy invalid: {err}"));
        }
        self.seedpack = Some(p);
        Ok(())
    }

    fn proposal(&mut self, index: usize, p: &'a ProposalPayload) -> Result<()> {
        if self.seedpack.is_none() {
            self.structure(index, "proposal before seedpack");
        }
        let computed = proposal_hash(p.source, p.confidence, &p.interpretations)?;
        self.check_hash("proposal_hash", &p.proposal_hash, &computed);
        self.proposal = Some(p);

        if let Some(seedpack) = self.seedpack {
            let proposal = Proposal::new(p.source, p.interpretations.clone(), p.confidence)?;
            // The reducer checks once, right after the proposal record.
            let reasons = expected_refusal(&proposal, &seedpack.policy_summary, index + 1)?;
            self.expected_refusal = Some(reasons);
        }
        Ok(())
    }

    fn interpretation_commit(&mut self, index: usize, p: &'a InterpretationCommitPayload) -> Result<()> {
        let recorded = commit_hash(&p.interpretation, p.accepted_from.as_deref())?;
        self.check_hash("commit_hash_self", &p.commit_hash, &recorded);
        self.commit = Some(p);

        if let Some(reasons) = self.expected_refusal.as_ref().filter(|r| !r.is_empty()) {
            self.mismatches.push(ReplayMismatch::UnrefusedCommit {
                reasons: reasons.clone(),
            });
        }

        let (Some(seedpack), Some(recorded_proposal)) = (self.seedpack, self.proposal) else {
            self.structure(index, "commit without seedpack and proposal");
            return Ok(());
        };

        let proposal = Proposal::new(
            recorded_proposal.source,
            recorded_proposal.interpretations.clone(),
            recorded_proposal.confidence,
        )?;
        match collapse_proposal(&proposal, &seedpack.policy_summary) {
            Ok(commit) => {
                if commit.value() != &p.interpretation {
                    self.mismatches.push(ReplayMismatch::Winner {
                        recorded: p.interpretation.name().to_string(),
                        computed: commit.value().name().to_string(),
                    });
                }
                self.check_hash("commit_hash", &p.commit_hash, commit.commit_hash());
            }
            Err(err) => self.structure(index, format!("recorded proposal does not collapse: {err}")),
        }
        Ok(())
    }

    fn dag_commit(&mut self, index: usize, p: &'a DagCommitPayload) -> Result<()> {
        // Recorded id -> id derived for this run.
        if let Err(err) = check_duplicate_node_ids(&p.nodes) {
            self.structure(index, err.to_string());
        }
        let mut rebuilt_ids: BTreeMap<&NodeId, NodeId> = BTreeMap::new();
        for node in &p.nodes {
            let rebuilt = self.dag.add_node(node.kind, node.payload.clone())?;
            self.check_hash("payload_hash", &node.payload_hash, &rebuilt.payload_hash);
            self.check_hash("node_id", node.id.as_str(), rebuilt.id.as_str());
            rebuilt_ids.insert(&node.id, rebuilt.id);
        }
        for edge in &p.edges {
            let (Some(from_id), Some(to_id)) = (rebuilt_ids.get(&edge.from_id), rebuilt_ids.get(&edge.to_id))
            else {
                self.structure(index, format!("edge {} references an unrecorded node", edge.id));
                continue;
            };
            let rebuilt = self.dag.add_edge(edge.kind, from_id, to_id)?;
            self.check_hash("edge_id", edge.id.as_str(), rebuilt.id.as_str());
        }

        // The recorded graph must also be the one the committed
        // interpretation implies.
        let (Some(seedpack), Some(commit)) = (self.seedpack, self.commit) else {
            self.structure(index, "dag commit without seedpack and interpretation commit");
            return Ok(());
        };
        let mut expected = Dag::new(self.run_id);
        build_dag(&mut expected, &seedpack.seed_text, &seedpack.seed_hash, &commit.interpretation)?;
        let (recorded, derived) = (self.dag.root_hash()?, expected.root_hash()?);
        self.check_hash("dag_structure", &recorded, &derived);
        Ok(())
    }

    fn blueprint(
        &mut self,
        index: usize,
        record: &'a EvidenceRecord,
        p: &'a BlueprintArtifactPayload,
    ) -> Result<()> {
        let blueprint = &p.blueprint;
        let verification = &p.verification;
        self.check_run_id(index, &blueprint.run_id);
        if let Some(seedpack) = self.seedpack {
            self.check_hash("blueprint.seed_hash", &blueprint.seed_hash, &seedpack.seed_hash);
        }

        let dag_root_hash = self.dag.root_hash()?;
        self.check_hash("dag_root_hash", &verification.dag_root_hash, &dag_root_hash);

        let blueprint_hash = blueprint.compute_hash()?;
        let recorded_blueprint_hash = verification
            .artifact_hashes
            .get(BLUEPRINT_ARTIFACT)
            .cloned()
            .unwrap_or_default();
        self.check_hash("blueprint_hash", &recorded_blueprint_hash, &blueprint_hash);

        let ledger_last_hash = record.parent.clone().unwrap_or_default();
        self.check_hash("ledger_last_hash", &verification.ledger_last_hash, &ledger_last_hash);

        let mut artifact_hashes = BTreeMap::new();
        artifact_hashes.insert(BLUEPRINT_ARTIFACT.to_string(), blueprint_hash);
        let computed = summary_hash(&ledger_last_hash, &dag_root_hash, &artifact_hashes)?;
        self.check_hash("summary_hash", &verification.expected_summary_hash, &computed);

        self.summary_hash = Some(computed);
        self.outcome = Some(RunOutcome::Blueprint {
            blueprint: blueprint.clone(),
            verification: verification.clone(),
        });
        Ok(())
    }

    fn refusal(&mut self, index: usize, p: &'a RefusalArtifactPayload) -> Result<()> {
        let report = &p.refusal;
        self.check_run_id(index, &report.run_id);

        let preceding: Vec<&str> = self.records[..index].iter().map(|r| r.record_hash.as_str()).collect();
        let recorded: Vec<&str> = report.evidence_record_hashes.iter().map(String::as_str).collect();
        if preceding != recorded {
            self.mismatches.push(ReplayMismatch::RefusalEvidence);
        }
        if !report.is_refused() {
            self.structure(index, format!("refusal status {:?}", report.status));
        }
        if self.commit.is_some() {
            self.structure(index, "refusal after interpretation commit");
        }
        if let Some(computed) = self.expected_refusal.clone() {
            if report.reason_codes != computed {
                self.mismatches.push(ReplayMismatch::RefusalReasons {
                    recorded: report.reason_codes.clone(),
                    computed: computed.clone(),
                });
            }
            if report.policy_suggestions != generate_policy_suggestions(&computed) {
                self.mismatches.push(ReplayMismatch::RefusalSuggestions);
            }
        }

        self.outcome = Some(RunOutcome::Refused(report.clone()));
        Ok(())
    }
}

/// Reason codes the reducer derives for `proposal` at `step`: the refusal
/// conditions, then `resolve_ambiguity_failed` if collapse yields nothing.
fn expected_refusal(
    proposal: &Proposal<Vec<Interpretation>>,
    policy: &Policy,
    step: usize,
) -> Result<Vec<String>> {
    let reasons = check_refusal_conditions(proposal, policy, step, 0, proposal.value());
    if !reasons.is_empty() {
        return Ok(reasons);
    }
    match collapse_proposal(proposal, policy) {
        Ok(_) => Ok(Vec::new()),
        Err(KernelError::EmptyProposal | KernelError::NothingAfterPrune) => {
            Ok(vec![RESOLVE_AMBIGUITY_FAILED.to_string()])
        }
        Err(err) => Err(err),
    }
}
