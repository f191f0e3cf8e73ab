//! crates/tb_io/src/lib.rs
//! Single-source-of-truth I/O crate: file-format parsing and validation,
//! canonical JSON emission, and digests of canonical bytes.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Strictly offline: setup files may only reference local paths.
//! - Public surface kept stable; details live in submodules.

#![forbid(unsafe_code)]

use serde::Serialize;
use thiserror::Error;

/// Unified error for tb_io (used by canonical_json/setup/registry/hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync, etc.)
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with an optional JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Hashing-related errors (e.g., feature disabled).
    #[error("hash error: {0}")]
    Hash(String),

    /// Generic validation / invariants.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column in its message; we keep the pointer
        // at root and let callers enrich it at higher layers.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

/* ---------------- Public modules (single source of truth) ---------------- */

pub mod canonical_json;
#[cfg(feature = "hash")]
pub mod hasher;
pub mod registry;
pub mod setup;

/* ---------------- Convenience: fallible hash wrapper ---------------- */

/// SHA-256 hex over canonical JSON bytes of `value`, or an error when
/// hashing is unavailable. Callers should prefer this over silently
/// skipping digests.
pub fn try_sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    #[cfg(feature = "hash")]
    {
        hasher::sha256_canonical(value)
    }
    #[cfg(not(feature = "hash"))]
    {
        let _ = value;
        Err(IoError::Hash("hash feature disabled".into()))
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`). Setup loading
/// follows a strict offline posture and rejects such paths early.
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}
