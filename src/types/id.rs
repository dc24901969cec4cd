// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Identity types.
//!
//! Ids are content-addressed: lowercase hex SHA-256 digests of a
//! domain-separated canonical value (see [`crate::graph::ids`]).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::canonical::{Canonical, CanonicalValue};
use crate::error::Result;

macro_rules! digest_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Canonical for $name {
            fn to_canonical(&self) -> Result<CanonicalValue> {
                Ok(CanonicalValue::from(self.0.as_str()))
            }
        }
    };
}

digest_id!(NodeId);
digest_id!(EdgeId);
