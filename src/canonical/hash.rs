// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! SHA-256 over canonical bytes. The only hash primitive in the kernel.

use sha2::{Digest, Sha256};

use super::encode::canonicalize;
use super::value::Canonical;
use crate::error::Result;

/// Lowercase 64-character hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Canonicalizes `value` and hashes the resulting bytes.
pub fn hash_canonical<T: Canonical + ?Sized>(value: &T) -> Result<String> {
    Ok(sha256_hex(&canonicalize(value)?))
}
