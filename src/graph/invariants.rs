// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Global DAG invariant checks.
//!
//! Each check is a pure function over a node/edge snapshot so the DAG can
//! run them against a tentative state before committing an edge.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::edge::Edge;
use super::node::Node;
use crate::error::{KernelError, Result};
use crate::types::{EdgeKind, NodeId};

/// Two nodes sharing an id must agree on kind and payload hash.
pub fn check_duplicate_node_ids<'a, I>(nodes: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut seen: FxHashMap<&NodeId, &Node> = FxHashMap::default();
    for node in nodes {
        if let Some(prev) = seen.insert(&node.id, node) {
            if prev.kind != node.kind || prev.payload_hash != node.payload_hash {
                return Err(KernelError::DuplicateNode {
                    id: node.id.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub fn check_edge_node_references(nodes: &BTreeMap<NodeId, Node>, edges: &[Edge]) -> Result<()> {
    for edge in edges {
        for endpoint in [&edge.from_id, &edge.to_id] {
            if !nodes.contains_key(endpoint) {
                return Err(KernelError::MissingNode {
                    edge: edge.id.to_string(),
                    node: endpoint.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub fn check_self_contradiction_edges(edges: &[Edge]) -> Result<()> {
    match edges
        .iter()
        .find(|e| e.kind == EdgeKind::Contradicts && e.from_id == e.to_id)
    {
        Some(edge) => Err(KernelError::SelfContradiction {
            edge: edge.id.to_string(),
        }),
        None => Ok(()),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the active DFS path.
    Gray,
    /// Fully explored.
    Black,
}

/// Iterative DFS over `depends_on`/`refines` edges. A back-edge into a gray
/// node is a cycle. Start nodes are visited in id order so the reported
/// node is stable.
pub fn check_cycles(nodes: &BTreeMap<NodeId, Node>, edges: &[Edge]) -> Result<()> {
    let mut adjacency: FxHashMap<&NodeId, Vec<&NodeId>> = FxHashMap::default();
    for edge in edges.iter().filter(|e| e.kind.is_derivation()) {
        adjacency.entry(&edge.from_id).or_default().push(&edge.to_id);
    }

    let mut marks: FxHashMap<&NodeId, Mark> = FxHashMap::default();
    let empty: Vec<&NodeId> = Vec::new();

    for start in nodes.keys() {
        if marks.contains_key(start) {
            continue;
        }
        // (node, index of the next child to visit)
        let mut stack: Vec<(&NodeId, usize)> = vec![(start, 0)];
        marks.insert(start, Mark::Gray);

        while let Some((node, next)) = stack.last_mut() {
            let children = adjacency.get(*node).unwrap_or(&empty);
            if let Some(child) = children.get(*next) {
                *next += 1;
                match marks.get(*child) {
                    Some(Mark::Gray) => {
                        return Err(KernelError::Cycle {
                            node: child.to_string(),
                        })
                    }
                    Some(Mark::Black) => {}
                    None => {
                        marks.insert(*child, Mark::Gray);
                        stack.push((*child, 0));
                    }
                }
            } else {
                marks.insert(*node, Mark::Black);
                stack.pop();
            }
        }
    }
    Ok(())
}

/// Runs every edge check in a fixed order; the first violation wins.
///
/// Node ids are map keys here, so duplicates are caught earlier by
/// `Dag::add_node`. Use [`check_duplicate_node_ids`] on node lists that
/// come from outside a `Dag`, such as recorded DAG commits.
pub fn check_all(nodes: &BTreeMap<NodeId, Node>, edges: &[Edge]) -> Result<()> {
    check_edge_node_references(nodes, edges)?;
    check_self_contradiction_edges(edges)?;
    check_cycles(nodes, edges)
}
