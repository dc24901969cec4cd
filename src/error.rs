// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.
//!
//! Two classes of failure abort an operation: malformed input at a boundary
//! and violated kernel invariants. Refusal is not an error; it is a terminal
//! run outcome (see [`crate::refusal`]).

use thiserror::Error;

use crate::proposer::ProposerError;

/// Coarse classification of a [`KernelError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Programmer or configuration error at a boundary.
    InvalidInput,
    /// Corrupted or tampered kernel state.
    Invariant,
}

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("non-finite float {0} cannot be canonicalized")]
    NonFiniteFloat(f64),

    #[error("value is not canonical JSON: {0}")]
    NotCanonical(String),

    #[error("interpretation {name:?} repeats assumption {assumption:?}")]
    DuplicateAssumption { name: String, assumption: String },

    #[error("policy field {field} is out of range: {reason}")]
    InvalidPolicy { field: &'static str, reason: String },

    #[error("unsupported tie-break method {0:?}")]
    UnsupportedTieBreak(String),

    #[error("cannot tie-break an empty candidate list")]
    EmptyTieBreak,

    #[error("proposer returned no interpretations")]
    EmptyProposal,

    #[error("no interpretations left after pruning")]
    NothingAfterPrune,

    #[error("record kind {declared} does not match payload kind {payload}")]
    RecordKindMismatch { declared: String, payload: String },

    #[error("proposer failure: {0}")]
    Proposer(#[from] ProposerError),

    #[error("node {id} already exists with different content")]
    DuplicateNode { id: String },

    #[error("edge {edge} references missing node {node}")]
    MissingNode { edge: String, node: String },

    #[error("contradicts edge {edge} points at its own source")]
    SelfContradiction { edge: String },

    #[error("cycle through node {node} among depends_on/refines edges")]
    Cycle { node: String },

    #[error("ledger chain invalid at record {index}: {reason}")]
    ChainInvalid { index: usize, reason: String },
}

impl KernelError {
    pub fn class(&self) -> ErrorClass {
        match self {
            KernelError::DuplicateNode { .. }
            | KernelError::MissingNode { .. }
            | KernelError::SelfContradiction { .. }
            | KernelError::Cycle { .. }
            | KernelError::ChainInvalid { .. } => ErrorClass::Invariant,
            _ => ErrorClass::InvalidInput,
        }
    }
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
