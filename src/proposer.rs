// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! External interpretation sources.
//!
//! A proposer is an untrusted oracle. Its output only ever reaches kernel
//! state through a [`Proposal`] that the kernel may later commit.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ambiguity::Interpretation;
use crate::envelope::Proposal;
use crate::error::KernelError;
use crate::types::ProposalSource;

#[derive(Error, Debug)]
pub enum ProposerError {
    #[error("no recording found for key {key}")]
    MissingRecording { key: String },

    #[error("malformed recordings: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("proposal could not be built: {0}")]
    Proposal(Box<KernelError>),
}

impl From<KernelError> for ProposerError {
    fn from(err: KernelError) -> Self {
        ProposerError::Proposal(Box::new(err))
    }
}

/// Supplies candidate interpretations for a seed.
///
/// Implementations must be pure functions of `(seed_hash, n)`; the engine
/// calls this exactly once per run and replay never calls it.
pub trait Proposer {
    fn propose_interpretations(
        &self,
        seed_hash: &str,
        n: usize,
    ) -> Result<Proposal<Vec<Interpretation>>, ProposerError>;
}

/// Lookup key for a recorded proposal.
pub fn recording_key(seed_hash: &str, n: usize) -> String {
    format!("interpretations:{seed_hash}:{n}")
}

/// Replays pre-recorded interpretation lists.
#[derive(Clone, Debug, Default)]
pub struct RecordedProposer {
    recordings: BTreeMap<String, Vec<Interpretation>>,
}

impl RecordedProposer {
    pub fn new(recordings: BTreeMap<String, Vec<Interpretation>>) -> Self {
        Self { recordings }
    }

    /// Parses a JSON object mapping keys to interpretation lists.
    pub fn from_json_str(json: &str) -> Result<Self, ProposerError> {
        let recordings: BTreeMap<String, Vec<Interpretation>> = serde_json::from_str(json)?;
        Ok(Self::new(recordings))
    }

    pub fn record(&mut self, seed_hash: &str, n: usize, interpretations: Vec<Interpretation>) {
        self.recordings.insert(recording_key(seed_hash, n), interpretations);
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }
}

impl Proposer for RecordedProposer {
    fn propose_interpretations(
        &self,
        seed_hash: &str,
        n: usize,
    ) -> Result<Proposal<Vec<Interpretation>>, ProposerError> {
        let key = recording_key(seed_hash, n);
        let interpretations = self
            .recordings
            .get(&key)
            .cloned()
            .ok_or(ProposerError::MissingRecording { key })?;
        Ok(Proposal::new(ProposalSource::Heuristic, interpretations, None)?)
    }
}

/// Always proposes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProposer;

impl Proposer for NullProposer {
    fn propose_interpretations(
        &self,
        _seed_hash: &str,
        _n: usize,
    ) -> Result<Proposal<Vec<Interpretation>>, ProposerError> {
        Ok(Proposal::new(ProposalSource::Heuristic, Vec::new(), None)?)
    }
}
