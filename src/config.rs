// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.
//!
//! Everything in this file is part of the frozen output contract: changing a
//! value changes downstream hashes and requires a `KERNEL_VERSION` bump.

/// Evidence record schema version.
pub const RECORD_VERSION: u64 = 1;

/// Version of the scoring/collapse/encoding contract.
pub const KERNEL_VERSION: &str = "0.1.0";

/// Zero-padding width of the step counter in timestamp tokens (`base#NNNN`).
pub const TS_STEP_WIDTH: usize = 4;

/// Invariants every emitted blueprint declares.
pub const BLUEPRINT_INVARIANTS: [&str; 3] = ["no_cycles", "all_edges_reference_nodes", "deterministic_ids"];

pub const REPLAY_INSTRUCTIONS: &str =
    "Replay by validating ledger chain and rebuilding DAG from records";

/// Runtime configuration threaded through the engine and replayer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelConfig {
    pub kernel_version: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            kernel_version: KERNEL_VERSION.to_string(),
        }
    }
}

/// Builds the deterministic ordering token for a step.
pub fn ts_token(base: &str, step: usize) -> String {
    format!("{base}#{step:0width$}", width = TS_STEP_WIDTH)
}
