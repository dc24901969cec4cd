// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shared builders for kernel tests.

use crate::ambiguity::Interpretation;
use crate::canonical::{hash_canonical, CanonicalValue};
use crate::policy::Policy;
use crate::proposer::RecordedProposer;
use crate::state::RunRequest;

pub const SEED: &str = "build a todo app";
pub const RUN_ID: &str = "run-1";

pub fn interp(name: &str, assumptions: &[&str], summary: &str) -> Interpretation {
    Interpretation::new(
        name,
        assumptions.iter().map(|a| a.to_string()).collect(),
        summary,
    )
    .unwrap()
}

pub fn policy() -> Policy {
    Policy::new(3, 50, 5, 10, 20)
}

pub fn seed_hash(seed: &str) -> String {
    hash_canonical(seed).unwrap()
}

/// Two candidates; "Minimal" (cost 19) beats "Full" (cost 39).
pub fn todo_interpretations() -> Vec<Interpretation> {
    vec![
        interp("Full", &["multi_user", "sync"], "todo list with sync"),
        interp("Minimal", &["single_user"], "todo list"),
    ]
}

pub fn recorded(seed: &str, n: usize, interpretations: Vec<Interpretation>) -> RecordedProposer {
    let mut proposer = RecordedProposer::default();
    proposer.record(&seed_hash(seed), n, interpretations);
    proposer
}

pub fn request(policy: Policy) -> RunRequest {
    RunRequest {
        run_id: RUN_ID.to_string(),
        seed_text: SEED.to_string(),
        pin: CanonicalValue::object([("target", CanonicalValue::from("rust"))]),
        policy,
        ts_base: "t0".to_string(),
    }
}
