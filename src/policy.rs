// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Exploration policy and deterministic tie-breaking.

use serde::{Deserialize, Serialize};

use crate::canonical::{Canonical, CanonicalValue};
use crate::error::{KernelError, Result};

/// The only supported tie-break method.
pub const LEXICOGRAPHIC: &str = "lexicographic";

/// Limits governing one run.
///
/// Counts are unsigned, so negative values are rejected when the policy is
/// parsed; [`validate_policy`] enforces the lower bounds and the tie-break
/// method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    pub max_interpretations: usize,
    pub max_nodes: usize,
    pub max_depth: usize,
    pub contradiction_budget: usize,
    pub max_steps: usize,
    #[serde(default = "default_tiebreak")]
    pub deterministic_tiebreak: String,
}

fn default_tiebreak() -> String {
    LEXICOGRAPHIC.to_string()
}

impl Policy {
    pub fn new(
        max_interpretations: usize,
        max_nodes: usize,
        max_depth: usize,
        contradiction_budget: usize,
        max_steps: usize,
    ) -> Self {
        Self {
            max_interpretations,
            max_nodes,
            max_depth,
            contradiction_budget,
            max_steps,
            deterministic_tiebreak: default_tiebreak(),
        }
    }
}

impl Canonical for Policy {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("max_interpretations", CanonicalValue::from(self.max_interpretations)),
            ("max_nodes", CanonicalValue::from(self.max_nodes)),
            ("max_depth", CanonicalValue::from(self.max_depth)),
            ("contradiction_budget", CanonicalValue::from(self.contradiction_budget)),
            ("max_steps", CanonicalValue::from(self.max_steps)),
            (
                "deterministic_tiebreak",
                CanonicalValue::from(self.deterministic_tiebreak.as_str()),
            ),
        ]))
    }
}

fn at_least_one(field: &'static str, value: usize) -> Result<()> {
    if value < 1 {
        return Err(KernelError::InvalidPolicy {
            field,
            reason: format!("must be >= 1, got {value}"),
        });
    }
    Ok(())
}

pub fn validate_policy(policy: &Policy) -> Result<()> {
    at_least_one("max_interpretations", policy.max_interpretations)?;
    at_least_one("max_nodes", policy.max_nodes)?;
    at_least_one("max_depth", policy.max_depth)?;
    at_least_one("max_steps", policy.max_steps)?;
    if policy.deterministic_tiebreak != LEXICOGRAPHIC {
        return Err(KernelError::UnsupportedTieBreak(
            policy.deterministic_tiebreak.clone(),
        ));
    }
    Ok(())
}

/// Picks one string deterministically. `lexicographic` returns the minimum.
pub fn tie_break<S: AsRef<str>>(strings: &[S], method: &str) -> Result<String> {
    if strings.is_empty() {
        return Err(KernelError::EmptyTieBreak);
    }
    if method != LEXICOGRAPHIC {
        return Err(KernelError::UnsupportedTieBreak(method.to_string()));
    }
    let smallest: Option<&str> = strings.iter().map(|s| s.as_ref()).min();
    smallest.map(str::to_string).ok_or(KernelError::EmptyTieBreak)
}
