// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::canonical::CanonicalValue;
use crate::error::{ErrorClass, KernelError};
use crate::graph::invariants::check_duplicate_node_ids;
use crate::graph::{Dag, Node};
use crate::types::{EdgeKind, NodeId, NodeKind};

fn claim(text: &str) -> CanonicalValue {
    CanonicalValue::object([("claim", CanonicalValue::from(text))])
}

/// a -> b -> c via depends_on.
fn chain() -> (Dag, Node, Node, Node) {
    let mut dag = Dag::new("run-1");
    let a = dag.add_node(NodeKind::Claim, claim("a")).unwrap();
    let b = dag.add_node(NodeKind::Claim, claim("b")).unwrap();
    let c = dag.add_node(NodeKind::Claim, claim("c")).unwrap();
    dag.add_edge(EdgeKind::DependsOn, &a.id, &b.id).unwrap();
    dag.add_edge(EdgeKind::DependsOn, &b.id, &c.id).unwrap();
    (dag, a, b, c)
}

#[test]
fn test_node_id_matches_reference_encoding() {
    let mut dag = Dag::new("run-1");
    let seed_hash = "5aa762ae383fbb727af3c7a36d4940a5b8c40a989452d2304fc958ff3f354e7a";
    let node = dag
        .add_node(
            NodeKind::Seed,
            CanonicalValue::object([
                ("seed_text", CanonicalValue::from("hello")),
                ("seed_hash", CanonicalValue::from(seed_hash)),
            ]),
        )
        .unwrap();
    assert_eq!(
        node.payload_hash,
        "f40b76921ff89a8555ba3bfc68a42134b3f5cea03f43fa39d98d4e90adb87349"
    );
    assert_eq!(
        node.id.as_str(),
        "3393998e586b7f640edc872af431b6e572bede98202015047e08fa70265f0005"
    );
}

#[test]
fn test_re_adding_identical_node_is_idempotent() {
    let mut dag = Dag::new("run-1");
    let first = dag.add_node(NodeKind::Claim, claim("x")).unwrap();
    let second = dag.add_node(NodeKind::Claim, claim("x")).unwrap();
    assert_eq!(first, second);
    assert_eq!(dag.node_count(), 1);
}

#[test]
fn test_ids_are_insertion_order_independent() {
    let mut forward = Dag::new("run-1");
    let mut backward = Dag::new("run-1");
    let texts = ["a", "b", "c"];
    let fwd: Vec<Node> = texts
        .iter()
        .map(|t| forward.add_node(NodeKind::Claim, claim(t)).unwrap())
        .collect();
    let mut bwd: Vec<Node> = texts
        .iter()
        .rev()
        .map(|t| backward.add_node(NodeKind::Claim, claim(t)).unwrap())
        .collect();
    bwd.reverse();
    assert_eq!(fwd, bwd);

    forward.add_edge(EdgeKind::Refines, &fwd[0].id, &fwd[1].id).unwrap();
    backward.add_edge(EdgeKind::Refines, &bwd[0].id, &bwd[1].id).unwrap();
    assert_eq!(forward.root_hash().unwrap(), backward.root_hash().unwrap());
}

#[test]
fn test_ids_are_separated_by_run() {
    let mut one = Dag::new("run-1");
    let mut two = Dag::new("run-2");
    let a = one.add_node(NodeKind::Claim, claim("x")).unwrap();
    let b = two.add_node(NodeKind::Claim, claim("x")).unwrap();
    assert_eq!(a.payload_hash, b.payload_hash);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_cycle_is_rejected_and_dag_unchanged() {
    let (mut dag, a, _b, c) = chain();
    let root_before = dag.root_hash().unwrap();

    let err = dag.add_edge(EdgeKind::DependsOn, &c.id, &a.id).unwrap_err();
    assert!(matches!(err, KernelError::Cycle { .. }));
    assert_eq!(err.class(), ErrorClass::Invariant);

    let err = dag.add_edge(EdgeKind::Refines, &c.id, &a.id).unwrap_err();
    assert!(matches!(err, KernelError::Cycle { .. }));

    assert_eq!(dag.edge_count(), 2);
    assert_eq!(dag.edges().count(), 2);
    assert_eq!(dag.root_hash().unwrap(), root_before);
    dag.check_invariants().unwrap();
}

#[test]
fn test_reflexive_depends_on_is_a_cycle() {
    let mut dag = Dag::new("run-1");
    let a = dag.add_node(NodeKind::Claim, claim("a")).unwrap();
    let err = dag.add_edge(EdgeKind::DependsOn, &a.id, &a.id).unwrap_err();
    assert!(matches!(err, KernelError::Cycle { .. }));
    assert_eq!(dag.edge_count(), 0);
}

#[test]
fn test_contradicts_is_exempt_from_cycle_check() {
    let (mut dag, a, _b, c) = chain();
    dag.add_edge(EdgeKind::Contradicts, &c.id, &a.id).unwrap();
    assert_eq!(dag.edge_count(), 3);
}

#[test]
fn test_reflexive_contradicts_fails() {
    let mut dag = Dag::new("run-1");
    let a = dag.add_node(NodeKind::Claim, claim("a")).unwrap();
    let err = dag.add_edge(EdgeKind::Contradicts, &a.id, &a.id).unwrap_err();
    assert!(matches!(err, KernelError::SelfContradiction { .. }));
    assert_eq!(dag.edge_count(), 0);
}

#[test]
fn test_opposite_contradicts_edges_both_succeed() {
    let mut dag = Dag::new("run-1");
    let a = dag.add_node(NodeKind::Claim, claim("a")).unwrap();
    let b = dag.add_node(NodeKind::Claim, claim("b")).unwrap();
    let ab = dag.add_edge(EdgeKind::Contradicts, &a.id, &b.id).unwrap();
    let ba = dag.add_edge(EdgeKind::Contradicts, &b.id, &a.id).unwrap();
    assert_ne!(ab.id, ba.id);
    assert_eq!(dag.edge_count(), 2);
}

#[test]
fn test_edge_to_missing_node_fails() {
    let mut dag = Dag::new("run-1");
    let a = dag.add_node(NodeKind::Claim, claim("a")).unwrap();
    let ghost = NodeId("f".repeat(64));
    let err = dag.add_edge(EdgeKind::DependsOn, &a.id, &ghost).unwrap_err();
    assert!(matches!(err, KernelError::MissingNode { .. }));
    assert_eq!(err.class(), ErrorClass::Invariant);
    assert_eq!(dag.edge_count(), 0);
}

#[test]
fn test_duplicate_edge_is_a_no_op() {
    let (mut dag, a, b, _c) = chain();
    let again = dag.add_edge(EdgeKind::DependsOn, &a.id, &b.id).unwrap();
    assert_eq!(dag.edge_count(), 2);
    assert_eq!(dag.get_edge(&again.id), Some(&again));
}

#[test]
fn test_conflicting_duplicate_node_ids_are_detected() {
    let mut dag = Dag::new("run-1");
    let node = dag.add_node(NodeKind::Claim, claim("a")).unwrap();
    let mut forged = node.clone();
    forged.payload_hash = "0".repeat(64);
    let err = check_duplicate_node_ids([&node, &forged]).unwrap_err();
    assert!(matches!(err, KernelError::DuplicateNode { .. }));
    check_duplicate_node_ids([&node, &node.clone()]).unwrap();
}
