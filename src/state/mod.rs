// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Run orchestration.

pub mod phase;
pub mod reducer;

pub use phase::RunPhase;
pub use reducer::{run_engine, Engine, RunOutcome, RunRequest, RunResult};
