// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Proposal/Commit authority boundary.

pub mod commit;
pub mod proposal;

pub use commit::Commit;
pub use proposal::Proposal;
