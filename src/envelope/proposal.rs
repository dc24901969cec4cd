// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Non-authoritative suggestions from outside the kernel.

use crate::canonical::{hash_canonical, Canonical, CanonicalValue};
use crate::error::Result;
use crate::types::ProposalSource;

/// A suggestion from an external source (LLM, retrieval, heuristic).
///
/// A proposal never changes kernel state by itself; the kernel may accept
/// its value into a [`super::Commit`]. `proposal_hash` covers
/// `{source, confidence, value}`, so equal logical values hash identically
/// regardless of map key order.
#[derive(Clone, Debug, PartialEq)]
pub struct Proposal<T> {
    source: ProposalSource,
    confidence: Option<f64>,
    value: T,
    proposal_hash: String,
}

impl<T: Canonical> Proposal<T> {
    /// Fails if `value` or `confidence` cannot be canonicalized (e.g. NaN).
    pub fn new(source: ProposalSource, value: T, confidence: Option<f64>) -> Result<Self> {
        let proposal_hash = proposal_hash(source, confidence, &value)?;
        Ok(Self {
            source,
            confidence,
            value,
            proposal_hash,
        })
    }

    pub fn source(&self) -> ProposalSource {
        self.source
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn proposal_hash(&self) -> &str {
        &self.proposal_hash
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Hash of the canonical `{source, confidence, value}` projection.
pub fn proposal_hash<T: Canonical + ?Sized>(
    source: ProposalSource,
    confidence: Option<f64>,
    value: &T,
) -> Result<String> {
    hash_canonical(&CanonicalValue::object([
        ("source", source.to_canonical()?),
        ("confidence", confidence.to_canonical()?),
        ("value", value.to_canonical()?),
    ]))
}

impl<T: Canonical> Canonical for Proposal<T> {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("source", self.source.to_canonical()?),
            ("confidence", self.confidence.to_canonical()?),
            ("value", self.value.to_canonical()?),
            ("proposal_hash", CanonicalValue::from(self.proposal_hash.as_str())),
        ]))
    }
}
