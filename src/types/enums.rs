// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Kind enums.
//!
//! Each kind hashes as its snake_case name, which is also its serde form.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::canonical::{Canonical, CanonicalValue};
use crate::error::Result;

macro_rules! kind_enum {
    ($name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Canonical for $name {
            fn to_canonical(&self) -> Result<CanonicalValue> {
                Ok(CanonicalValue::from(self.as_str()))
            }
        }
    };
}

kind_enum!(NodeKind {
    Seed => "seed",
    Interpretation => "interpretation",
    Assumption => "assumption",
    Claim => "claim",
    Decision => "decision",
    Artifact => "artifact",
});

kind_enum!(EdgeKind {
    DependsOn => "depends_on",
    Refines => "refines",
    Contradicts => "contradicts",
});

kind_enum!(RecordKind {
    Seedpack => "seedpack",
    Proposal => "proposal",
    Commit => "commit",
    Artifact => "artifact",
});

kind_enum!(ProposalSource {
    Llm => "llm",
    Retrieval => "retrieval",
    Heuristic => "heuristic",
});

impl EdgeKind {
    /// Derivation edges participate in cycle detection; `contradicts` does not.
    pub fn is_derivation(&self) -> bool {
        matches!(self, EdgeKind::DependsOn | EdgeKind::Refines)
    }
}
