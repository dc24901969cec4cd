// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical serialization and hashing.

pub mod encode;
pub mod hash;
pub mod value;

pub use encode::{canonicalize, encode};
pub use hash::{hash_canonical, sha256_hex};
pub use value::{Canonical, CanonicalValue};
