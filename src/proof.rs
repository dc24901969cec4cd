//! Replay Proof Structures.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::replay::ReplayReport;

/// A receipt that a ledger replays to a specific summary.
///
/// Derived from a [`ReplayReport`] and meant to be printed or stored as
/// JSON next to the ledger it covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplayProof {
    /// Kernel version that performed the replay.
    pub kernel_version: String,

    pub run_id: String,

    pub record_count: usize,

    /// Hash of the last ledger record; `None` for an empty ledger.
    pub ledger_last_hash: Option<String>,

    /// Root hash of the DAG rebuilt from commit records.
    pub dag_root_hash: String,

    /// Recomputed summary hash; absent for refused runs.
    pub summary_hash: Option<String>,

    /// `blueprint`, `refused`, or `none` when no terminal artifact exists.
    pub outcome: String,

    pub matches_expected: bool,

    pub mismatches: Vec<String>,
}

impl ReplayProof {
    pub fn from_report(report: &ReplayReport, kernel_version: impl Into<String>) -> Self {
        Self {
            kernel_version: kernel_version.into(),
            run_id: report.run_id.clone(),
            record_count: report.record_count,
            ledger_last_hash: report.ledger_last_hash.clone(),
            dag_root_hash: report.dag_root_hash.clone(),
            summary_hash: report.summary_hash.clone(),
            outcome: report
                .outcome
                .as_ref()
                .map_or("none", |o| o.label())
                .to_string(),
            matches_expected: report.matches_expected,
            mismatches: report.mismatches.iter().map(ToString::to_string).collect(),
        }
    }
}
