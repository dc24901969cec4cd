// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Interpretation cost.
//!
//! Lower is better: shorter summaries and fewer invented assumptions win.
//! The weights are part of the output contract; changing them changes
//! collapse winners and requires a `KERNEL_VERSION` bump.

use super::interpretation::Interpretation;

pub const ASSUMPTION_WEIGHT: u64 = 10;
pub const SHARED_ASSUMPTION_PENALTY: u64 = 5;

/// `len(intent_summary) + 10 * |assumptions| + 5 * extra occurrences`.
///
/// Summary length counts Unicode scalar values, not bytes. An assumption
/// seen in `k > 1` interpretations of `all` adds `5 * (k - 1)`.
pub fn score_interpretation(interpretation: &Interpretation, all: &[Interpretation]) -> u64 {
    let base = interpretation.intent_summary().chars().count() as u64
        + ASSUMPTION_WEIGHT * interpretation.assumptions().len() as u64;

    let penalty: u64 = interpretation
        .assumptions()
        .iter()
        .map(|assumption| occurrences(assumption, all))
        .filter(|&count| count > 1)
        .map(|count| SHARED_ASSUMPTION_PENALTY * (count - 1))
        .sum();

    base + penalty
}

/// Number of interpretations in `all` that carry `assumption`.
pub(crate) fn occurrences(assumption: &str, all: &[Interpretation]) -> u64 {
    all.iter().filter(|i| i.has_assumption(assumption)).count() as u64
}
