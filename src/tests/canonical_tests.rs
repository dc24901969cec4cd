// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde_json::json;

use crate::canonical::{canonicalize, encode, hash_canonical, sha256_hex, CanonicalValue};
use crate::error::{ErrorClass, KernelError};

#[test]
fn test_map_key_order_does_not_change_bytes() {
    let a = json!({"b": 1, "a": [1, 2], "c": {"y": null, "x": true}});
    let b = json!({"c": {"x": true, "y": null}, "a": [1, 2], "b": 1});
    assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
    assert_eq!(
        canonicalize(&a).unwrap(),
        br#"{"a":[1,2],"b":1,"c":{"x":true,"y":null}}"#.to_vec()
    );
}

#[test]
fn test_list_order_is_preserved() {
    assert_ne!(
        canonicalize(&json!([1, 2])).unwrap(),
        canonicalize(&json!([2, 1])).unwrap()
    );
}

#[test]
fn test_keys_sort_by_byte_value_and_unicode_is_raw() {
    let value = json!({"é": 2, "z": 1, "a": [true, null, 0.1]});
    let bytes = canonicalize(&value).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":[true,null,0.1],"z":1,"é":2}"#);
}

#[test]
fn test_large_unsigned_integers_render_plainly() {
    let bytes = encode(&CanonicalValue::from(u64::MAX)).unwrap();
    assert_eq!(bytes, b"18446744073709551615".to_vec());
}

#[test]
fn test_non_finite_floats_are_rejected() {
    assert!(matches!(
        CanonicalValue::float(f64::NAN),
        Err(KernelError::NonFiniteFloat(_))
    ));
    let err = hash_canonical(&f64::INFINITY).unwrap_err();
    assert!(matches!(err, KernelError::NonFiniteFloat(_)));
    assert_eq!(err.class(), ErrorClass::InvalidInput);
}

#[test]
fn test_sha256_hex_known_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_hash_is_stable_lowercase_hex() {
    let a = hash_canonical("hello").unwrap();
    let b = hash_canonical("hello").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_string_hash_matches_reference_encoding() {
    // SHA-256 of the bytes `"hello"` (quotes included).
    assert_eq!(
        hash_canonical("hello").unwrap(),
        "5aa762ae383fbb727af3c7a36d4940a5b8c40a989452d2304fc958ff3f354e7a"
    );
}

#[test]
fn test_json_value_round_trips_through_canonical_value() {
    let value: CanonicalValue = serde_json::from_str(r#"{"k":[1,-2,1.5,"s",null]}"#).unwrap();
    assert_eq!(encode(&value).unwrap(), br#"{"k":[1,-2,1.5,"s",null]}"#.to_vec());
}
