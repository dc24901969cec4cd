// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod fixtures;

pub mod canonical_tests;
pub mod graph_tests;
pub mod refusal_tests;
pub mod replay_tests;
pub mod determinism_tests;
