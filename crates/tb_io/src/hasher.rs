//! Deterministic hashing for canonical artifacts.
//!
//! - Canonical JSON hashing: UTF-8, sorted object keys, array order preserved.
//! - Hex digests are lowercase.
//!
//! Use `sha256_canonical(..)` for JSON values/structs (goes through
//! canonical_json) and `sha256_hex(..)` for raw bytes.

#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::{canonical_bytes, value_to_canonical_bytes};
use crate::IoResult;

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&canonical_bytes(value)?))
}

/// SHA-256 over canonical bytes of an already-parsed JSON value.
pub fn sha256_canonical_value(v: &Value) -> String {
    sha256_hex(&value_to_canonical_bytes(v))
}
