// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::fixtures::{interp, policy};
use crate::ambiguity::Interpretation;
use crate::envelope::Proposal;
use crate::policy::Policy;
use crate::refusal::{check_refusal_conditions, count_contradictions, generate_policy_suggestions};
use crate::types::ProposalSource;

fn proposal(interpretations: Vec<Interpretation>) -> Proposal<Vec<Interpretation>> {
    Proposal::new(ProposalSource::Heuristic, interpretations, None).unwrap()
}

#[test]
fn test_no_reasons_for_healthy_proposal() {
    let p = proposal(vec![interp("A", &["x"], "s")]);
    assert!(check_refusal_conditions(&p, &policy(), 2, 0, p.value()).is_empty());
}

#[test]
fn test_empty_proposal_reason() {
    let p = proposal(vec![]);
    let reasons = check_refusal_conditions(&p, &policy(), 2, 0, p.value());
    assert_eq!(reasons, vec!["empty_proposal".to_string()]);
}

#[test]
fn test_contradictions_counted_beyond_first_occurrence() {
    let all = vec![
        interp("A", &["x", "y"], "s"),
        interp("B", &["x", "y"], "s"),
        interp("C", &["x"], "s"),
    ];
    // x: 3 occurrences (+2), y: 2 occurrences (+1)
    assert_eq!(count_contradictions(&all), 3);

    let p = proposal(all);
    let tight = Policy::new(3, 50, 5, 2, 20);
    let reasons = check_refusal_conditions(&p, &tight, 2, 0, p.value());
    assert_eq!(reasons, vec!["contradictions_exceeded:3>2".to_string()]);

    let exact = Policy::new(3, 50, 5, 3, 20);
    assert!(check_refusal_conditions(&p, &exact, 2, 0, p.value()).is_empty());
}

#[test]
fn test_budget_reasons_accumulate_in_order() {
    let p = proposal(vec![]);
    let tight = Policy::new(1, 1, 1, 0, 1);
    let reasons = check_refusal_conditions(&p, &tight, 5, 4, p.value());
    assert_eq!(
        reasons,
        vec![
            "empty_proposal".to_string(),
            "max_nodes_exceeded:4>1".to_string(),
            "max_steps_exceeded:5>1".to_string(),
        ]
    );
    assert_eq!(
        generate_policy_suggestions(&reasons),
        vec![
            "Increase proposer output or check proposer configuration".to_string(),
            "Increase max_nodes or simplify seed intent".to_string(),
            "Increase max_steps or reduce exploration depth".to_string(),
        ]
    );
}

#[test]
fn test_every_reason_family_has_a_suggestion() {
    let codes = [
        "empty_proposal",
        "contradictions_exceeded:3>2",
        "max_nodes_exceeded:2>1",
        "max_steps_exceeded:2>1",
        "resolve_ambiguity_failed",
    ];
    assert_eq!(generate_policy_suggestions(&codes).len(), codes.len());
}
