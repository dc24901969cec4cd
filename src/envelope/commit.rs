// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Authoritative kernel decisions.

use super::proposal::Proposal;
use crate::canonical::{hash_canonical, Canonical, CanonicalValue};
use crate::error::Result;

/// The only authoritative carrier of state.
///
/// Constructors are crate-private: a proposer can hand the kernel a
/// [`Proposal`], but only the kernel can turn a value into a `Commit`.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit<T> {
    value: T,
    accepted_from: Option<String>,
    commit_hash: String,
}

impl<T: Canonical> Commit<T> {
    /// A direct kernel decision (`accepted_from = None`) or one citing a proposal hash.
    pub(crate) fn new(value: T, accepted_from: Option<String>) -> Result<Self> {
        let commit_hash = commit_hash(&value, accepted_from.as_deref())?;
        Ok(Self {
            value,
            accepted_from,
            commit_hash,
        })
    }

    /// Accepts `value`, derived from `proposal`, citing its hash.
    pub(crate) fn accept<P: Canonical>(proposal: &Proposal<P>, value: T) -> Result<Self> {
        Self::new(value, Some(proposal.proposal_hash().to_string()))
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn accepted_from(&self) -> Option<&str> {
        self.accepted_from.as_deref()
    }

    pub fn commit_hash(&self) -> &str {
        &self.commit_hash
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Hash of the canonical `{value, accepted_from}` projection.
pub fn commit_hash<T: Canonical + ?Sized>(value: &T, accepted_from: Option<&str>) -> Result<String> {
    hash_canonical(&CanonicalValue::object([
        ("value", value.to_canonical()?),
        ("accepted_from", CanonicalValue::from(accepted_from)),
    ]))
}

impl<T: Canonical> Canonical for Commit<T> {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("value", self.value.to_canonical()?),
            ("accepted_from", CanonicalValue::from(self.accepted_from.as_deref())),
            ("commit_hash", CanonicalValue::from(self.commit_hash.as_str())),
        ]))
    }
}
