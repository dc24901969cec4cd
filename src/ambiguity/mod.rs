// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ambiguity resolution: expand, score, prune, collapse, commit.

pub mod interpretation;
pub mod prune;
pub mod scoring;

use tracing::debug;

pub use interpretation::Interpretation;
pub use prune::prune_interpretations;
pub use scoring::score_interpretation;

use crate::envelope::{Commit, Proposal};
use crate::error::{KernelError, Result};
use crate::policy::Policy;
use crate::proposer::Proposer;

/// Asks `proposer` for candidates and collapses them to one commit.
pub fn resolve_ambiguity<P: Proposer + ?Sized>(
    run_id: &str,
    seed_hash: &str,
    policy: &Policy,
    proposer: &P,
) -> Result<Commit<Interpretation>> {
    let proposal = proposer.propose_interpretations(seed_hash, policy.max_interpretations)?;
    debug!(
        run_id,
        proposal_hash = proposal.proposal_hash(),
        candidates = proposal.value().len(),
        "expanded seed"
    );
    collapse_proposal(&proposal, policy)
}

/// Collapses an already obtained proposal.
///
/// The winner is the head of the pruned list: lowest cost, then smallest
/// name. The commit cites the proposal hash.
pub fn collapse_proposal(
    proposal: &Proposal<Vec<Interpretation>>,
    policy: &Policy,
) -> Result<Commit<Interpretation>> {
    if proposal.value().is_empty() {
        return Err(KernelError::EmptyProposal);
    }

    let winner = prune_interpretations(proposal.value(), policy)
        .into_iter()
        .next()
        .ok_or(KernelError::NothingAfterPrune)?;

    debug!(winner = winner.name(), "collapsed proposal");
    Commit::accept(proposal, winner)
}
