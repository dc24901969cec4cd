// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shared identity and kind types.

pub mod enums;
pub mod id;

pub use enums::{EdgeKind, NodeKind, ProposalSource, RecordKind};
pub use id::{EdgeId, NodeId};
