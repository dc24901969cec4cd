// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Evidence record definition.

use serde::{Deserialize, Serialize};

use super::payload::RecordPayload;
use crate::canonical::{hash_canonical, CanonicalValue};
use crate::error::Result;
use crate::types::RecordKind;

/// One hash-chained ledger entry.
///
/// `record_hash` covers `{v, ts, kind, parent, payload_hash}` only; the
/// payload is bound through its hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceRecord {
    pub v: u64,
    pub ts: String,
    pub kind: RecordKind,
    pub parent: Option<String>,
    pub payload: RecordPayload,
    pub payload_hash: String,
    pub record_hash: String,
}

pub fn record_hash(
    v: u64,
    ts: &str,
    kind: RecordKind,
    parent: Option<&str>,
    payload_hash: &str,
) -> Result<String> {
    hash_canonical(&CanonicalValue::object([
        ("v", CanonicalValue::from(v)),
        ("ts", CanonicalValue::from(ts)),
        ("kind", CanonicalValue::from(kind.as_str())),
        ("parent", CanonicalValue::from(parent)),
        ("payload_hash", CanonicalValue::from(payload_hash)),
    ]))
}

impl EvidenceRecord {
    /// Recomputes the record hash from this record's own metadata.
    pub fn compute_record_hash(&self) -> Result<String> {
        record_hash(
            self.v,
            &self.ts,
            self.kind,
            self.parent.as_deref(),
            &self.payload_hash,
        )
    }
}
