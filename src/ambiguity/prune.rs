// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Top-K selection.

use super::interpretation::Interpretation;
use super::scoring::score_interpretation;
use crate::policy::Policy;

/// Sorts by `(cost, name)` ascending and keeps `policy.max_interpretations`.
///
/// Every candidate is scored against the full input list, not the survivors.
pub fn prune_interpretations(interpretations: &[Interpretation], policy: &Policy) -> Vec<Interpretation> {
    let mut scored: Vec<(u64, &Interpretation)> = interpretations
        .iter()
        .map(|i| (score_interpretation(i, interpretations), i))
        .collect();

    scored.sort_by(|(ca, a), (cb, b)| ca.cmp(cb).then_with(|| a.name().cmp(b.name())));

    scored
        .into_iter()
        .take(policy.max_interpretations)
        .map(|(_, i)| i.clone())
        .collect()
}
