// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reducer phases.

use core::fmt;

use serde::{Deserialize, Serialize};

/// States of one run, in the order the reducer may visit them.
///
/// `Seeding → Proposing → (Refusing | Committing → BuildingDag → Artifacting) → Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Seeding,
    Proposing,
    Refusing,
    Committing,
    BuildingDag,
    Artifacting,
    Done,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Seeding => "seeding",
            RunPhase::Proposing => "proposing",
            RunPhase::Refusing => "refusing",
            RunPhase::Committing => "committing",
            RunPhase::BuildingDag => "building_dag",
            RunPhase::Artifacting => "artifacting",
            RunPhase::Done => "done",
        }
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: RunPhase) -> bool {
        use RunPhase::*;
        matches!(
            (self, next),
            (Seeding, Proposing)
                | (Proposing, Refusing)
                | (Proposing, Committing)
                | (Committing, Refusing)
                | (Committing, BuildingDag)
                | (BuildingDag, Artifacting)
                | (Artifacting, Done)
                | (Refusing, Done)
        )
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
