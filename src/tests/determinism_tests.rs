// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Property tests: everything observable is a function of the inputs alone.

use proptest::prelude::*;

use super::fixtures::{policy, recorded, request, SEED};
use crate::ambiguity::{prune_interpretations, Interpretation};
use crate::canonical::{canonicalize, hash_canonical, CanonicalValue};
use crate::graph::Dag;
use crate::replay::replay_from_ledger;
use crate::state::run_engine;
use crate::types::NodeKind;

fn entries() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::btree_map("[a-zé]{1,6}", any::<i64>(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

/// Candidates with unique names, so `(cost, name)` is a total order.
fn candidates() -> impl Strategy<Value = Vec<Interpretation>> {
    prop::collection::btree_map(
        "[A-Z][a-z]{0,5}",
        (prop::collection::btree_set("[a-c]", 0..3), "[a-z ]{0,12}"),
        1..6,
    )
    .prop_map(|m| {
        m.into_iter()
            .map(|(name, (assumptions, summary))| {
                Interpretation::new(name, assumptions.into_iter().collect(), summary).unwrap()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_map_entry_order_is_irrelevant(entries in entries()) {
        let forward = CanonicalValue::object(
            entries.iter().map(|(k, v)| (k.clone(), CanonicalValue::from(*v))),
        );
        let backward = CanonicalValue::object(
            entries.iter().rev().map(|(k, v)| (k.clone(), CanonicalValue::from(*v))),
        );
        prop_assert_eq!(canonicalize(&forward).unwrap(), canonicalize(&backward).unwrap());
    }

    #[test]
    fn prop_hash_is_64_lowercase_hex(s in ".*") {
        let h = hash_canonical(s.as_str()).unwrap();
        prop_assert_eq!(h.len(), 64);
        prop_assert!(h.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        prop_assert_eq!(h, hash_canonical(s.as_str()).unwrap());
    }

    #[test]
    fn prop_node_ids_ignore_insertion_order(texts in prop::collection::btree_set("[a-z]{1,4}", 1..6)) {
        let texts: Vec<String> = texts.into_iter().collect();
        let mut forward = Dag::new("run-p");
        let mut backward = Dag::new("run-p");
        for t in &texts {
            forward.add_node(NodeKind::Claim, CanonicalValue::from(t.as_str())).unwrap();
        }
        for t in texts.iter().rev() {
            backward.add_node(NodeKind::Claim, CanonicalValue::from(t.as_str())).unwrap();
        }
        prop_assert_eq!(forward.root_hash().unwrap(), backward.root_hash().unwrap());
    }

    #[test]
    fn prop_prune_ignores_candidate_order(all in candidates()) {
        let mut reversed = all.clone();
        reversed.reverse();
        prop_assert_eq!(
            prune_interpretations(&all, &policy()),
            prune_interpretations(&reversed, &policy())
        );
    }

    #[test]
    fn prop_engine_run_replays(all in candidates()) {
        let proposer = recorded(SEED, 3, all);
        let result = run_engine(&request(policy()), &proposer).unwrap();
        let again = run_engine(&request(policy()), &proposer).unwrap();
        prop_assert_eq!(&result.ledger_records, &again.ledger_records);

        let report = replay_from_ledger(&result.ledger_records, &result.run_id).unwrap();
        prop_assert!(report.matches_expected, "{:?}", report.mismatches);
    }
}
