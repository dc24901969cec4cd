// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! blueprint-kernel: a deterministic reasoning kernel.
//!
//! Turns an ambiguous seed into either a committed, verifiable blueprint or
//! an explicit refusal. Every step is appended to a hash-chained ledger that
//! [`replay`] can re-verify without consulting the proposer.

pub mod ambiguity;
pub mod artifacts;
pub mod canonical;
pub mod config;
pub mod envelope;
pub mod error;
pub mod graph;
pub mod ledger;
pub mod policy;
pub mod proof;
pub mod proposer;
pub mod refusal;
pub mod replay;
pub mod state;
pub mod types;

pub use ambiguity::{collapse_proposal, resolve_ambiguity, Interpretation};
pub use artifacts::{BlueprintSpec, RefusalReport, VerificationPack};
pub use canonical::{canonicalize, hash_canonical, Canonical, CanonicalValue};
pub use config::KernelConfig;
pub use envelope::{Commit, Proposal};
pub use error::{ErrorClass, KernelError, Result};
pub use graph::Dag;
pub use ledger::{validate_chain, EvidenceRecord, Ledger};
pub use policy::{validate_policy, Policy};
pub use proof::ReplayProof;
pub use proposer::{NullProposer, Proposer, ProposerError, RecordedProposer};
pub use replay::{replay_from_ledger, ReplayReport, Replayer};
pub use state::{run_engine, Engine, RunOutcome, RunRequest, RunResult};

#[cfg(test)]
pub mod tests;
