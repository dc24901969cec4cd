// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Refusal detection.
//!
//! The kernel declines to commit rather than guess. Reason codes are stable
//! machine-readable strings; `<family>:<observed>><limit>` for budget codes.

use std::collections::BTreeMap;

use crate::ambiguity::Interpretation;
use crate::envelope::Proposal;
use crate::policy::Policy;

pub const EMPTY_PROPOSAL: &str = "empty_proposal";
pub const CONTRADICTIONS_EXCEEDED: &str = "contradictions_exceeded";
pub const MAX_NODES_EXCEEDED: &str = "max_nodes_exceeded";
pub const MAX_STEPS_EXCEEDED: &str = "max_steps_exceeded";
pub const RESOLVE_AMBIGUITY_FAILED: &str = "resolve_ambiguity_failed";

/// Sum over every assumption seen in two or more interpretations of
/// `occurrences - 1`.
pub fn count_contradictions(interpretations: &[Interpretation]) -> usize {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for interpretation in interpretations {
        for assumption in interpretation.assumptions() {
            *counts.entry(assumption.as_str()).or_default() += 1;
        }
    }
    counts.values().filter(|&&c| c > 1).map(|c| c - 1).sum()
}

/// Evaluates every stop condition in a fixed order. Codes accumulate.
pub fn check_refusal_conditions(
    proposal: &Proposal<Vec<Interpretation>>,
    policy: &Policy,
    step_count: usize,
    node_count: usize,
    interpretations: &[Interpretation],
) -> Vec<String> {
    let mut reasons = Vec::new();

    if proposal.value().is_empty() {
        reasons.push(EMPTY_PROPOSAL.to_string());
    }

    let contradictions = count_contradictions(interpretations);
    if contradictions > policy.contradiction_budget {
        reasons.push(format!(
            "{CONTRADICTIONS_EXCEEDED}:{contradictions}>{}",
            policy.contradiction_budget
        ));
    }

    if node_count > policy.max_nodes {
        reasons.push(format!("{MAX_NODES_EXCEEDED}:{node_count}>{}", policy.max_nodes));
    }

    if step_count > policy.max_steps {
        reasons.push(format!("{MAX_STEPS_EXCEEDED}:{step_count}>{}", policy.max_steps));
    }

    reasons
}

fn suggestion_for(reason: &str) -> Option<&'static str> {
    let family = reason.split(':').next().unwrap_or(reason);
    match family {
        EMPTY_PROPOSAL => Some("Increase proposer output or check proposer configuration"),
        CONTRADICTIONS_EXCEEDED => Some("Increase contradiction_budget or reduce assumption overlap"),
        MAX_NODES_EXCEEDED => Some("Increase max_nodes or simplify seed intent"),
        MAX_STEPS_EXCEEDED => Some("Increase max_steps or reduce exploration depth"),
        RESOLVE_AMBIGUITY_FAILED => Some("Check proposer output or relax max_interpretations"),
        _ => None,
    }
}

/// One remediation template per recognised reason code, in input order.
pub fn generate_policy_suggestions<S: AsRef<str>>(reason_codes: &[S]) -> Vec<String> {
    reason_codes
        .iter()
        .filter_map(|r| suggestion_for(r.as_ref()))
        .map(str::to_string)
        .collect()
}
