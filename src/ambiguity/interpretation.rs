// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Candidate readings of a seed.

use serde::{Deserialize, Serialize};

use crate::canonical::{Canonical, CanonicalValue};
use crate::error::{KernelError, Result};

/// One candidate reading of the seed intent.
///
/// Assumptions are unique; construction (including deserialization) fails
/// on a repeated assumption string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterpretation")]
pub struct Interpretation {
    name: String,
    assumptions: Vec<String>,
    intent_summary: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInterpretation {
    name: String,
    assumptions: Vec<String>,
    intent_summary: String,
}

impl TryFrom<RawInterpretation> for Interpretation {
    type Error = KernelError;

    fn try_from(raw: RawInterpretation) -> Result<Self> {
        Interpretation::new(raw.name, raw.assumptions, raw.intent_summary)
    }
}

impl Interpretation {
    pub fn new(
        name: impl Into<String>,
        assumptions: Vec<String>,
        intent_summary: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        for (i, assumption) in assumptions.iter().enumerate() {
            if assumptions[..i].contains(assumption) {
                return Err(KernelError::DuplicateAssumption {
                    name,
                    assumption: assumption.clone(),
                });
            }
        }
        Ok(Self {
            name,
            assumptions,
            intent_summary: intent_summary.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assumptions(&self) -> &[String] {
        &self.assumptions
    }

    pub fn intent_summary(&self) -> &str {
        &self.intent_summary
    }

    pub fn has_assumption(&self, assumption: &str) -> bool {
        self.assumptions.iter().any(|a| a == assumption)
    }
}

impl Canonical for Interpretation {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::object([
            ("name", CanonicalValue::from(self.name.as_str())),
            ("assumptions", self.assumptions.to_canonical()?),
            ("intent_summary", CanonicalValue::from(self.intent_summary.as_str())),
        ]))
    }
}
