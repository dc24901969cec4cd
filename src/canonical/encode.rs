// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical JSON emitter.
//!
//! # Format
//! - UTF-8, no insignificant whitespace
//! - object keys ascending by byte value
//! - arrays in input order
//! - integers as plain decimal, floats as the shortest round-trip text
//! - strings escape only `"`, `\` and U+0000..=U+001F
//!
//! Any change here changes every identifier in the system.

use std::fmt::Write as _;

use super::value::{Canonical, CanonicalValue};
use crate::error::{KernelError, Result};

/// Canonicalizes any [`Canonical`] value to bytes.
pub fn canonicalize<T: Canonical + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let projected = value.to_canonical()?;
    encode(&projected)
}

/// Encodes an already projected value.
pub fn encode(value: &CanonicalValue) -> Result<Vec<u8>> {
    let mut out = String::new();
    emit_value(value, &mut out)?;
    Ok(out.into_bytes())
}

fn emit_value(value: &CanonicalValue, out: &mut String) -> Result<()> {
    match value {
        CanonicalValue::Null => out.push_str("null"),
        CanonicalValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        CanonicalValue::Int(i) => {
            let _ = write!(out, "{i}");
        }
        CanonicalValue::UInt(u) => {
            let _ = write!(out, "{u}");
        }
        CanonicalValue::Float(f) => emit_float(*f, out)?,
        CanonicalValue::Str(s) => emit_string(s, out),
        CanonicalValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit_value(item, out)?;
            }
            out.push(']');
        }
        CanonicalValue::Map(map) => {
            // BTreeMap<String, _> iterates in byte order already.
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit_string(key, out);
                out.push(':');
                emit_value(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn emit_float(value: f64, out: &mut String) -> Result<()> {
    let number = serde_json::Number::from_f64(value).ok_or(KernelError::NonFiniteFloat(value))?;
    let _ = write!(out, "{number}");
    Ok(())
}

fn emit_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if ('\u{0000}'..='\u{001F}').contains(&c) => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &CanonicalValue) -> String {
        String::from_utf8(encode(value).unwrap()).unwrap()
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let value = CanonicalValue::from("a\"b\\c\nd\u{0001}é");
        assert_eq!(text(&value), "\"a\\\"b\\\\c\\nd\\u0001é\"");
    }

    #[test]
    fn test_floats_use_shortest_round_trip() {
        assert_eq!(text(&CanonicalValue::float(0.1).unwrap()), "0.1");
        assert_eq!(text(&CanonicalValue::float(1.5).unwrap()), "1.5");
        assert_eq!(text(&CanonicalValue::float(1.0).unwrap()), "1.0");
    }

    #[test]
    fn test_raw_non_finite_float_is_rejected_by_emitter() {
        let err = encode(&CanonicalValue::Float(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, KernelError::NonFiniteFloat(_)));
    }
}
