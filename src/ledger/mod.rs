// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only, hash-chained evidence ledger.

pub mod payload;
pub mod record;
pub mod validate;

use tracing::debug;

pub use payload::{
    BlueprintArtifactPayload, DagCommitPayload, InterpretationCommitPayload, ProposalPayload,
    RecordPayload, RefusalArtifactPayload, SeedpackPayload,
};
pub use record::{record_hash, EvidenceRecord};
pub use validate::{validate_chain, verify_chain, ChainViolation, ViolationKind};

use crate::canonical::hash_canonical;
use crate::config::RECORD_VERSION;
use crate::error::{KernelError, Result};
use crate::types::RecordKind;

/// There is no update or delete; the only mutation is [`Ledger::append`].
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: Vec<EvidenceRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `payload`, links it to the current head and appends it.
    ///
    /// `kind` must agree with the payload's own kind.
    pub fn append(
        &mut self,
        ts: impl Into<String>,
        kind: RecordKind,
        payload: RecordPayload,
    ) -> Result<EvidenceRecord> {
        if payload.kind() != kind {
            return Err(KernelError::RecordKindMismatch {
                declared: kind.to_string(),
                payload: payload.kind().to_string(),
            });
        }

        let ts = ts.into();
        let payload_hash = hash_canonical(&payload)?;
        let parent = self.get_last_hash().map(str::to_string);
        let record_hash = record_hash(RECORD_VERSION, &ts, kind, parent.as_deref(), &payload_hash)?;

        let record = EvidenceRecord {
            v: RECORD_VERSION,
            ts,
            kind,
            parent,
            payload,
            payload_hash,
            record_hash,
        };
        debug!(
            index = self.records.len(),
            ts = %record.ts,
            kind = %kind,
            record_hash = %record.record_hash,
            "ledger append"
        );
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn records(&self) -> &[EvidenceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EvidenceRecord> {
        self.records
    }

    /// Hash of the head record, `None` when empty.
    pub fn get_last_hash(&self) -> Option<&str> {
        self.records.last().map(|r| r.record_hash.as_str())
    }

    pub fn record_hashes(&self) -> Vec<String> {
        self.records.iter().map(|r| r.record_hash.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
