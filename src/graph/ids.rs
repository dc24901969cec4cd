// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Content-addressed node and edge ids.
//!
//! Both hash a map tagged with `t` (`"node"` / `"edge"`) and the run id, so
//! a node and an edge can never share an id and two runs never collide.

use crate::canonical::{hash_canonical, Canonical, CanonicalValue};
use crate::error::Result;
use crate::types::{EdgeId, EdgeKind, NodeId, NodeKind};

pub fn node_id(run_id: &str, kind: NodeKind, payload_hash: &str) -> Result<NodeId> {
    let domain = CanonicalValue::object([
        ("t", CanonicalValue::from("node")),
        ("run_id", CanonicalValue::from(run_id)),
        ("kind", kind.to_canonical()?),
        ("payload_hash", CanonicalValue::from(payload_hash)),
    ]);
    Ok(NodeId(hash_canonical(&domain)?))
}

pub fn edge_id(run_id: &str, kind: EdgeKind, from: &NodeId, to: &NodeId) -> Result<EdgeId> {
    let domain = CanonicalValue::object([
        ("t", CanonicalValue::from("edge")),
        ("run_id", CanonicalValue::from(run_id)),
        ("kind", kind.to_canonical()?),
        ("from", from.to_canonical()?),
        ("to", to.to_canonical()?),
    ]);
    Ok(EdgeId(hash_canonical(&domain)?))
}
