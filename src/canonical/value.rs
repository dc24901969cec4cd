// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical value domain.
//!
//! `CanonicalValue` is the closed set of JSON-safe shapes the kernel hashes.
//! Domain types opt in through [`Canonical`]; there is deliberately no impl
//! for sets, hash maps, or byte buffers, so unordered or binary data cannot
//! reach the hasher.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{KernelError, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Only used for integers above `i64::MAX`.
    UInt(u64),
    /// Always finite.
    Float(f64),
    Str(String),
    List(Vec<CanonicalValue>),
    Map(BTreeMap<String, CanonicalValue>),
}

impl CanonicalValue {
    pub fn float(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(CanonicalValue::Float(value))
        } else {
            Err(KernelError::NonFiniteFloat(value))
        }
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CanonicalValue)>,
    {
        CanonicalValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn empty_object() -> Self {
        CanonicalValue::Map(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalValue> {
        match self {
            CanonicalValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CanonicalValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }
}

impl From<&str> for CanonicalValue {
    fn from(value: &str) -> Self {
        CanonicalValue::Str(value.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(value: String) -> Self {
        CanonicalValue::Str(value)
    }
}

impl From<&String> for CanonicalValue {
    fn from(value: &String) -> Self {
        CanonicalValue::Str(value.clone())
    }
}

impl From<bool> for CanonicalValue {
    fn from(value: bool) -> Self {
        CanonicalValue::Bool(value)
    }
}

impl From<i64> for CanonicalValue {
    fn from(value: i64) -> Self {
        CanonicalValue::Int(value)
    }
}

impl From<u64> for CanonicalValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => CanonicalValue::Int(v),
            Err(_) => CanonicalValue::UInt(value),
        }
    }
}

impl From<usize> for CanonicalValue {
    fn from(value: usize) -> Self {
        CanonicalValue::from(value as u64)
    }
}

impl<T: Into<CanonicalValue>> From<Option<T>> for CanonicalValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CanonicalValue::Null, Into::into)
    }
}

impl<T: Into<CanonicalValue>> From<Vec<T>> for CanonicalValue {
    fn from(value: Vec<T>) -> Self {
        CanonicalValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for CanonicalValue {
    type Error = KernelError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;
        Ok(match value {
            Value::Null => CanonicalValue::Null,
            Value::Bool(b) => CanonicalValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CanonicalValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    CanonicalValue::UInt(u)
                } else {
                    let f = n
                        .as_f64()
                        .ok_or_else(|| KernelError::NotCanonical(format!("number {n}")))?;
                    CanonicalValue::float(f)?
                }
            }
            Value::String(s) => CanonicalValue::Str(s),
            Value::Array(items) => CanonicalValue::List(
                items
                    .into_iter()
                    .map(CanonicalValue::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => CanonicalValue::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, CanonicalValue::try_from(v)?)))
                    .collect::<Result<BTreeMap<_, _>>>()?,
            ),
        })
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            CanonicalValue::Null => serializer.serialize_unit(),
            CanonicalValue::Bool(b) => serializer.serialize_bool(*b),
            CanonicalValue::Int(i) => serializer.serialize_i64(*i),
            CanonicalValue::UInt(u) => serializer.serialize_u64(*u),
            CanonicalValue::Float(f) => serializer.serialize_f64(*f),
            CanonicalValue::Str(s) => serializer.serialize_str(s),
            CanonicalValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CanonicalValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

/// Capability to reduce a value to its canonical projection.
///
/// Every type embedded in a ledger payload, DAG node, or
/// Proposal/Commit envelope implements this.
pub trait Canonical {
    fn to_canonical(&self) -> Result<CanonicalValue>;
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        (**self).to_canonical()
    }
}

impl Canonical for CanonicalValue {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        if let CanonicalValue::Float(f) = self {
            return CanonicalValue::float(*f);
        }
        Ok(self.clone())
    }
}

impl Canonical for bool {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::Bool(*self))
    }
}

macro_rules! canonical_int {
    ($($t:ty),*) => {
        $(
            impl Canonical for $t {
                fn to_canonical(&self) -> Result<CanonicalValue> {
                    Ok(CanonicalValue::from(*self as i64))
                }
            }
        )*
    };
}

canonical_int!(i32, i64, u32);

impl Canonical for u64 {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::from(*self))
    }
}

impl Canonical for usize {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::from(*self))
    }
}

impl Canonical for f64 {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        CanonicalValue::float(*self)
    }
}

impl Canonical for str {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::from(self))
    }
}

impl Canonical for String {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::from(self.as_str()))
    }
}

impl<T: Canonical> Canonical for Option<T> {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        match self {
            Some(v) => v.to_canonical(),
            None => Ok(CanonicalValue::Null),
        }
    }
}

impl<T: Canonical> Canonical for [T] {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::List(
            self.iter().map(Canonical::to_canonical).collect::<Result<Vec<_>>>()?,
        ))
    }
}

impl<T: Canonical> Canonical for Vec<T> {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        self.as_slice().to_canonical()
    }
}

impl<T: Canonical> Canonical for BTreeMap<String, T> {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        Ok(CanonicalValue::Map(
            self.iter()
                .map(|(k, v)| Ok((k.clone(), v.to_canonical()?)))
                .collect::<Result<BTreeMap<_, _>>>()?,
        ))
    }
}

impl Canonical for serde_json::Value {
    fn to_canonical(&self) -> Result<CanonicalValue> {
        CanonicalValue::try_from(self.clone())
    }
}
