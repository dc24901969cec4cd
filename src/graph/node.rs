//! Graph Node definition.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::canonical::{Canonical, CanonicalValue};
use crate::error::Result;
use crate::types::{NodeId, NodeKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub payload: CanonicalValue,
    pub payload_hash: String,
}

impl Canonical for Node {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("id", self.id.to_canonical()?),
            ("kind", self.kind.to_canonical()?),
            ("payload", self.payload.to_canonical()?),
            ("payload_hash", CanonicalValue::from(self.payload_hash.as_str())),
        ]))
    }
}
