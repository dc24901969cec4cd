// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Loading and writing of run inputs and outputs.
//!
//! The kernel performs no I/O; everything that touches the filesystem lives here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blueprint_kernel::graph::{Edge, Node};
use blueprint_kernel::proposer::recording_key;
use blueprint_kernel::{
    hash_canonical, validate_policy, CanonicalValue, EvidenceRecord, Interpretation, Policy,
    RecordedProposer, RunOutcome, RunResult,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const LEDGER_FILE: &str = "ledger.json";
pub const ARTIFACTS_FILE: &str = "artifacts.json";

/// Contents of `artifacts.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunArtifacts {
    pub run_id: String,
    pub kernel_version: String,
    pub outcome: RunOutcome,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl RunArtifacts {
    pub fn from_result(result: &RunResult, kernel_version: &str) -> Self {
        Self {
            run_id: result.run_id.clone(),
            kernel_version: kernel_version.to_string(),
            outcome: result.outcome.clone(),
            nodes: result.nodes.clone(),
            edges: result.edges.clone(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {what} {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {what} {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads the seed text. A single trailing line ending is not part of the seed.
pub fn load_seed(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read seed {}", path.display()))?;
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    Ok(text.to_string())
}

pub fn load_pin(path: &Path) -> Result<CanonicalValue> {
    read_json(path, "pin")
}

pub fn load_policy(path: &Path) -> Result<Policy> {
    let policy: Policy = read_json(path, "policy")?;
    validate_policy(&policy).with_context(|| format!("Invalid policy in {}", path.display()))?;
    Ok(policy)
}

pub fn load_recordings(path: &Path) -> Result<RecordedProposer> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recordings {}", path.display()))?;
    RecordedProposer::from_json_str(&json)
        .with_context(|| format!("Failed to parse recordings {}", path.display()))
}

pub fn load_ledger(path: &Path) -> Result<Vec<EvidenceRecord>> {
    read_json(path, "ledger")
}

pub fn load_artifacts(path: &Path) -> Result<RunArtifacts> {
    read_json(path, "artifacts")
}

/// Input files of a sample run.
#[derive(Debug, Clone)]
pub struct ScenarioPaths {
    pub seed: PathBuf,
    pub pin: PathBuf,
    pub policy: PathBuf,
    pub recordings: PathBuf,
}

pub const SAMPLE_SEED: &str = "build a todo app";

/// Writes a converging sample scenario into `dir`.
///
/// The recordings hold two candidates for the sample seed; `Minimal` wins.
pub fn generate_run_scenario(dir: &Path) -> Result<ScenarioPaths> {
    let policy = Policy::new(3, 50, 5, 10, 20);
    let seed_hash = hash_canonical(SAMPLE_SEED)?;

    let mut recordings: BTreeMap<String, Vec<Interpretation>> = BTreeMap::new();
    recordings.insert(
        recording_key(&seed_hash, policy.max_interpretations),
        vec![
            Interpretation::new(
                "Full",
                vec!["multi_user".to_string(), "sync".to_string()],
                "todo list with sync",
            )?,
            Interpretation::new("Minimal", vec!["single_user".to_string()], "todo list")?,
        ],
    );

    let paths = ScenarioPaths {
        seed: dir.join("seed.txt"),
        pin: dir.join("pin.json"),
        policy: dir.join("policy.json"),
        recordings: dir.join("recordings.json"),
    };
    fs::write(&paths.seed, format!("{SAMPLE_SEED}\n"))
        .with_context(|| format!("Failed to write {}", paths.seed.display()))?;
    write_json(&paths.pin, &serde_json::json!({ "target": "rust" }))?;
    write_json(&paths.policy, &policy)?;
    write_json(&paths.recordings, &recordings)?;
    Ok(paths)
}
