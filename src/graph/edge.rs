//! Graph Edge definition.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::canonical::{Canonical, CanonicalValue};
use crate::error::Result;
use crate::types::{EdgeId, EdgeKind, NodeId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edge {
    pub id: EdgeId,
    pub kind: EdgeKind,
    pub from_id: NodeId,
    pub to_id: NodeId,
}

impl Canonical for Edge {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("id", self.id.to_canonical()?),
            ("kind", self.kind.to_canonical()?),
            ("from_id", self.from_id.to_canonical()?),
            ("to_id", self.to_id.to_canonical()?),
        ]))
    }
}
