// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operator tooling around the kernel: fixture loading and run-directory commands.

pub mod commands;
pub mod fixtures;
