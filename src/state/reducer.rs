// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Engine reducer: seed → ledger → committed DAG → artifacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::phase::RunPhase;
use crate::ambiguity::{collapse_proposal, Interpretation};
use crate::artifacts::{BlueprintSpec, RefusalReport, VerificationPack, BLUEPRINT_ARTIFACT};
use crate::canonical::{hash_canonical, CanonicalValue};
use crate::config::{ts_token, KernelConfig};
use crate::envelope::Proposal;
use crate::error::{KernelError, Result};
use crate::graph::{Dag, Edge, Node};
use crate::ledger::{
    BlueprintArtifactPayload, DagCommitPayload, EvidenceRecord, InterpretationCommitPayload,
    Ledger, ProposalPayload, RecordPayload, RefusalArtifactPayload, SeedpackPayload,
};
use crate::policy::{validate_policy, Policy};
use crate::proposer::Proposer;
use crate::refusal::{check_refusal_conditions, generate_policy_suggestions, RESOLVE_AMBIGUITY_FAILED};
use crate::types::{EdgeKind, NodeKind, RecordKind};

/// Inputs of one run. Together with the proposer's output they fully
/// determine every byte the run emits.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRequest {
    pub run_id: String,
    pub seed_text: String,
    pub pin: CanonicalValue,
    pub policy: Policy,
    /// Base of the ordering tokens; never a wall-clock reading.
    pub ts_base: String,
}

/// Terminal artifact of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Blueprint {
        blueprint: BlueprintSpec,
        verification: VerificationPack,
    },
    Refused(RefusalReport),
}

impl RunOutcome {
    pub fn is_refused(&self) -> bool {
        matches!(self, RunOutcome::Refused(_))
    }

    pub fn expected_summary_hash(&self) -> Option<&str> {
        match self {
            RunOutcome::Blueprint { verification, .. } => Some(&verification.expected_summary_hash),
            RunOutcome::Refused(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Blueprint { .. } => "blueprint",
            RunOutcome::Refused(_) => "refused",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub run_id: String,
    pub ledger_records: Vec<EvidenceRecord>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub outcome: RunOutcome,
    /// Every phase the reducer entered, in order.
    pub phases: Vec<RunPhase>,
}

/// Drives one run at a time. Holds no state between runs.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: KernelConfig,
}

impl Engine {
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Runs the reducer to completion.
    ///
    /// Refusal is an `Ok` outcome. Errors are reserved for an invalid
    /// policy, a failing proposer, and kernel invariant violations.
    pub fn run<P: Proposer + ?Sized>(&self, request: &RunRequest, proposer: &P) -> Result<RunResult> {
        validate_policy(&request.policy)?;
        Reduction::new(&self.config, request).run(proposer)
    }
}

/// Convenience wrapper running with the default [`KernelConfig`].
pub fn run_engine<P: Proposer + ?Sized>(request: &RunRequest, proposer: &P) -> Result<RunResult> {
    Engine::default().run(request, proposer)
}

struct Reduction<'a> {
    config: &'a KernelConfig,
    request: &'a RunRequest,
    phase: RunPhase,
    phases: Vec<RunPhase>,
    step: usize,
    ledger: Ledger,
    dag: Dag,
}

impl<'a> Reduction<'a> {
    fn new(config: &'a KernelConfig, request: &'a RunRequest) -> Self {
        Self {
            config,
            request,
            phase: RunPhase::Seeding,
            phases: vec![RunPhase::Seeding],
            step: 0,
            ledger: Ledger::new(),
            dag: Dag::new(request.run_id.as_str()),
        }
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(self.phase.can_advance_to(next), "{} -> {}", self.phase, next);
        debug!(run_id = %self.request.run_id, from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        self.phases.push(next);
    }

    fn append(&mut self, kind: RecordKind, payload: RecordPayload) -> Result<EvidenceRecord> {
        let ts = ts_token(&self.request.ts_base, self.step);
        let record = self.ledger.append(ts, kind, payload)?;
        self.step += 1;
        Ok(record)
    }

    fn run<P: Proposer + ?Sized>(mut self, proposer: &P) -> Result<RunResult> {
        let request = self.request;
        let policy = &request.policy;

        let seed_hash = hash_canonical(request.seed_text.as_str())?;
        self.append(
            RecordKind::Seedpack,
            RecordPayload::Seedpack(SeedpackPayload {
                seed_text: request.seed_text.clone(),
                seed_hash: seed_hash.clone(),
                pin: request.pin.clone(),
                policy_summary: policy.clone(),
                kernel_version: self.config.kernel_version.clone(),
            }),
        )?;

        self.advance(RunPhase::Proposing);
        let proposal = proposer.propose_interpretations(&seed_hash, policy.max_interpretations)?;
        self.append(RecordKind::Proposal, proposal_payload(&proposal))?;

        let reasons = check_refusal_conditions(
            &proposal,
            policy,
            self.step,
            self.dag.node_count(),
            proposal.value(),
        );
        if !reasons.is_empty() {
            return self.refuse(&seed_hash, reasons);
        }

        self.advance(RunPhase::Committing);
        let commit = match collapse_proposal(&proposal, policy) {
            Ok(commit) => commit,
            Err(KernelError::EmptyProposal | KernelError::NothingAfterPrune) => {
                return self.refuse(&seed_hash, vec![RESOLVE_AMBIGUITY_FAILED.to_string()]);
            }
            Err(err) => return Err(err),
        };
        self.append(
            RecordKind::Commit,
            RecordPayload::InterpretationCommit(InterpretationCommitPayload {
                interpretation: commit.value().clone(),
                commit_hash: commit.commit_hash().to_string(),
                accepted_from: commit.accepted_from().map(str::to_string),
            }),
        )?;

        self.advance(RunPhase::BuildingDag);
        let intent_root = build_dag(&mut self.dag, &request.seed_text, &seed_hash, commit.value())?;
        self.append(
            RecordKind::Commit,
            RecordPayload::DagCommit(DagCommitPayload {
                nodes: self.dag.nodes().cloned().collect(),
                edges: self.dag.edges().cloned().collect(),
            }),
        )?;

        self.advance(RunPhase::Artifacting);
        let dag_root_hash = self.dag.root_hash()?;
        let blueprint = BlueprintSpec::new(
            request.run_id.as_str(),
            seed_hash.as_str(),
            intent_root.id,
            request.pin.clone(),
        );
        let mut artifact_hashes = BTreeMap::new();
        artifact_hashes.insert(BLUEPRINT_ARTIFACT.to_string(), blueprint.compute_hash()?);
        let ledger_last_hash = self.ledger.get_last_hash().unwrap_or_default().to_string();
        let verification = VerificationPack::new(ledger_last_hash, dag_root_hash, artifact_hashes)?;

        self.append(
            RecordKind::Artifact,
            RecordPayload::Blueprint(BlueprintArtifactPayload {
                blueprint: blueprint.clone(),
                verification: verification.clone(),
            }),
        )?;

        info!(
            run_id = %request.run_id,
            summary_hash = %verification.expected_summary_hash,
            nodes = self.dag.node_count(),
            edges = self.dag.edge_count(),
            "run converged"
        );
        self.finish(RunOutcome::Blueprint {
            blueprint,
            verification,
        })
    }

    fn refuse(mut self, seed_hash: &str, reason_codes: Vec<String>) -> Result<RunResult> {
        self.advance(RunPhase::Refusing);
        let policy_suggestions = generate_policy_suggestions(&reason_codes);
        let report = RefusalReport::new(
            self.request.run_id.as_str(),
            seed_hash,
            reason_codes,
            self.ledger.record_hashes(),
            policy_suggestions,
        );
        self.append(
            RecordKind::Artifact,
            RecordPayload::Refusal(RefusalArtifactPayload {
                refusal: report.clone(),
            }),
        )?;
        warn!(run_id = %self.request.run_id, reasons = ?report.reason_codes, "run refused");
        self.finish(RunOutcome::Refused(report))
    }

    fn finish(mut self, outcome: RunOutcome) -> Result<RunResult> {
        self.advance(RunPhase::Done);
        Ok(RunResult {
            run_id: self.request.run_id.clone(),
            nodes: self.dag.nodes().cloned().collect(),
            edges: self.dag.edges().cloned().collect(),
            ledger_records: self.ledger.into_records(),
            outcome,
            phases: self.phases,
        })
    }
}

fn proposal_payload(proposal: &Proposal<Vec<Interpretation>>) -> RecordPayload {
    RecordPayload::Proposal(ProposalPayload {
        source: proposal.source(),
        confidence: proposal.confidence(),
        interpretations: proposal.value().clone(),
        proposal_hash: proposal.proposal_hash().to_string(),
    })
}

/// Seed, interpretation and assumption nodes with their edges. Returns the
/// interpretation node, which roots the blueprint.
pub(crate) fn build_dag(
    dag: &mut Dag,
    seed_text: &str,
    seed_hash: &str,
    interpretation: &Interpretation,
) -> Result<Node> {
    let seed = dag.add_node(
        NodeKind::Seed,
        CanonicalValue::object([
            ("seed_text", CanonicalValue::from(seed_text)),
            ("seed_hash", CanonicalValue::from(seed_hash)),
        ]),
    )?;
    let root = dag.add_node(
        NodeKind::Interpretation,
        CanonicalValue::object([
            ("name", CanonicalValue::from(interpretation.name())),
            ("intent_summary", CanonicalValue::from(interpretation.intent_summary())),
        ]),
    )?;
    dag.add_edge(EdgeKind::Refines, &seed.id, &root.id)?;

    for assumption in interpretation.assumptions() {
        let node = dag.add_node(
            NodeKind::Assumption,
            CanonicalValue::object([("assumption", CanonicalValue::from(assumption.as_str()))]),
        )?;
        dag.add_edge(EdgeKind::DependsOn, &root.id, &node.id)?;
    }
    Ok(root)
}
