// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain validation.

use core::fmt;

use thiserror::Error;

use super::record::EvidenceRecord;
use crate::canonical::hash_canonical;
use crate::error::KernelError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Payload could not be canonicalized.
    Unhashable(String),
    PayloadHash,
    Parent,
    RecordHash,
    KindMismatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unhashable(e) => write!(f, "payload not hashable: {e}"),
            ViolationKind::PayloadHash => f.write_str("payload_hash does not match payload"),
            ViolationKind::Parent => f.write_str("parent does not link to previous record"),
            ViolationKind::RecordHash => f.write_str("record_hash does not match metadata"),
            ViolationKind::KindMismatch => f.write_str("record kind does not match payload"),
        }
    }
}

/// First point at which a record sequence stops being a valid chain.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("record {index}: {kind}")]
pub struct ChainViolation {
    pub index: usize,
    pub kind: ViolationKind,
}

impl From<ChainViolation> for KernelError {
    fn from(v: ChainViolation) -> Self {
        KernelError::ChainInvalid {
            index: v.index,
            reason: v.kind.to_string(),
        }
    }
}

/// Checks every record; stops at the first violation.
///
/// Each record's parent must equal the previous record's stored
/// `record_hash`, and that stored hash is itself recomputed, so any edit to
/// an earlier record surfaces no later than the record after it.
pub fn verify_chain(records: &[EvidenceRecord]) -> Result<(), ChainViolation> {
    let mut expected_parent: Option<&str> = None;

    for (index, record) in records.iter().enumerate() {
        let violation = |kind| ChainViolation { index, kind };

        if record.payload.kind() != record.kind {
            return Err(violation(ViolationKind::KindMismatch));
        }

        let payload_hash = hash_canonical(&record.payload)
            .map_err(|e| violation(ViolationKind::Unhashable(e.to_string())))?;
        if payload_hash != record.payload_hash {
            return Err(violation(ViolationKind::PayloadHash));
        }

        if record.parent.as_deref() != expected_parent {
            return Err(violation(ViolationKind::Parent));
        }

        let record_hash = record
            .compute_record_hash()
            .map_err(|e| violation(ViolationKind::Unhashable(e.to_string())))?;
        if record_hash != record.record_hash {
            return Err(violation(ViolationKind::RecordHash));
        }

        expected_parent = Some(&record.record_hash);
    }
    Ok(())
}

/// `true` iff the whole sequence is a valid chain. Empty is valid.
pub fn validate_chain(records: &[EvidenceRecord]) -> bool {
    verify_chain(records).is_ok()
}
