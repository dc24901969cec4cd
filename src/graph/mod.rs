// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Authoritative reasoning DAG for one run.

pub mod edge;
pub mod ids;
pub mod invariants;
pub mod node;

use std::collections::BTreeMap;

use tracing::debug;

pub use edge::Edge;
pub use ids::{edge_id, node_id};
pub use node::Node;

use crate::canonical::{hash_canonical, CanonicalValue};
use crate::error::{KernelError, Result};
use crate::types::{EdgeId, EdgeKind, NodeId, NodeKind};

/// Nodes and edges keyed by content-derived id.
///
/// Insertion order is kept alongside the maps so callers (and ledger
/// records) see nodes and edges in the order the reducer created them.
#[derive(Clone, Debug, Default)]
pub struct Dag {
    run_id: String,
    nodes: BTreeMap<NodeId, Node>,
    node_order: Vec<NodeId>,
    edges: BTreeMap<EdgeId, Edge>,
    edge_order: Vec<EdgeId>,
}

impl Dag {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Self::default()
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Adds a node, or returns the existing one on identical resubmission.
    pub fn add_node(&mut self, kind: NodeKind, payload: CanonicalValue) -> Result<Node> {
        let payload_hash = hash_canonical(&payload)?;
        let id = node_id(&self.run_id, kind, &payload_hash)?;

        if let Some(existing) = self.nodes.get(&id) {
            if existing.kind != kind || existing.payload_hash != payload_hash {
                return Err(KernelError::DuplicateNode { id: id.to_string() });
            }
            return Ok(existing.clone());
        }

        let node = Node {
            id: id.clone(),
            kind,
            payload,
            payload_hash,
        };
        debug!(node_id = %id, kind = %kind, "dag node added");
        self.nodes.insert(id.clone(), node.clone());
        self.node_order.push(id);
        Ok(node)
    }

    /// Adds an edge between existing nodes.
    ///
    /// The edge is inserted tentatively and the global invariants are
    /// re-checked; on any violation it is removed again before the error
    /// is returned.
    pub fn add_edge(&mut self, kind: EdgeKind, from_id: &NodeId, to_id: &NodeId) -> Result<Edge> {
        let id = edge_id(&self.run_id, kind, from_id, to_id)?;

        for endpoint in [from_id, to_id] {
            if !self.nodes.contains_key(endpoint) {
                return Err(KernelError::MissingNode {
                    edge: id.to_string(),
                    node: endpoint.to_string(),
                });
            }
        }

        if let Some(existing) = self.edges.get(&id) {
            return Ok(existing.clone());
        }

        let edge = Edge {
            id: id.clone(),
            kind,
            from_id: from_id.clone(),
            to_id: to_id.clone(),
        };
        self.edges.insert(id.clone(), edge.clone());

        if let Err(err) = self.check_invariants() {
            self.edges.remove(&id);
            debug!(edge_id = %id, kind = %kind, error = %err, "dag edge rejected");
            return Err(err);
        }

        debug!(edge_id = %id, kind = %kind, "dag edge added");
        self.edge_order.push(id);
        Ok(edge)
    }

    pub fn check_invariants(&self) -> Result<()> {
        let edges: Vec<Edge> = self.edges.values().cloned().collect();
        invariants::check_all(&self.nodes, &edges)
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn root_hash(&self) -> Result<String> {
        let node_ids: Vec<&NodeId> = self.nodes.keys().collect();
        let edge_ids: Vec<&EdgeId> = self.edges.keys().collect();
        dag_root_hash(&node_ids, &edge_ids)
    }
}

/// Hash of `{node_ids, edge_ids}`, both sorted ascending.
pub fn dag_root_hash<N: AsRef<str>, E: AsRef<str>>(node_ids: &[N], edge_ids: &[E]) -> Result<String> {
    let mut nodes: Vec<&str> = node_ids.iter().map(|id| id.as_ref()).collect();
    let mut edges: Vec<&str> = edge_ids.iter().map(|id| id.as_ref()).collect();
    nodes.sort_unstable();
    edges.sort_unstable();
    hash_canonical(&CanonicalValue::object([
        ("node_ids", CanonicalValue::from(nodes)),
        ("edge_ids", CanonicalValue::from(edges)),
    ]))
}
