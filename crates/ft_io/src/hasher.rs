//! crates/ft_io/src/hasher.rs
//!
//! Deterministic hashing and ID builders for canonical artifacts.
//!
//! - Canonical JSON hashing: sorted object keys, array order preserved.
//! - `RES:<hex>` derives from the canonical bytes of the result body;
//!   `RUN:<timestamp>:<hex>` from a UTC timestamp plus the canonical run body.
//! - Hex digests are **lowercase**.
//!
//! Use `sha256_canonical(..)` for JSON values/structs and `sha256_hex(..)` for
//! raw bytes (the loader hashes each input file as read).

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::canonical_json::to_canonical_bytes;

#[derive(Error, Debug)]
pub enum HashError {
    #[error("canonicalization error: {0}")]
    Canonical(String),

    #[error("invalid timestamp (expected RFC3339 UTC like 2025-08-12T10:00:00Z): {0}")]
    InvalidTimestamp(String),
}

/* ---------------------------- Canonical hashing ---------------------------- */

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, HashError> {
    let bytes = to_canonical_bytes(value).map_err(|e| HashError::Canonical(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

/* ------------------------------- Raw hashing ------------------------------- */

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/* ---------------------------- Artifact ID builders ---------------------------- */

/// `RES:<hex>` — ID for `result.json` derived from canonical bytes.
pub fn res_id_from_canonical<T: Serialize>(value: &T) -> Result<String, HashError> {
    Ok(format!("RES:{}", sha256_canonical(value)?))
}

/// `RUN:<ts>:<hex>` — `ts` must be `YYYY-MM-DDTHH:MM:SSZ`.
pub fn run_id_from_canonical<T: Serialize>(timestamp_utc: &str, value: &T) -> Result<String, HashError> {
    if !is_utc_seconds(timestamp_utc) {
        return Err(HashError::InvalidTimestamp(timestamp_utc.to_string()));
    }
    Ok(format!("RUN:{timestamp_utc}:{}", sha256_canonical(value)?))
}

/// Strict shape check: `YYYY-MM-DDTHH:MM:SSZ` (length 20) with basic ranges.
fn is_utc_seconds(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 20 {
        return false;
    }
    let shape = b.iter().enumerate().all(|(i, c)| match i {
        4 | 7 => *c == b'-',
        10 => *c == b'T',
        13 | 16 => *c == b':',
        19 => *c == b'Z',
        _ => c.is_ascii_digit(),
    });
    if !shape {
        return false;
    }
    let num = |r: std::ops::Range<usize>| s[r].parse::<u32>().unwrap_or(u32::MAX);
    (1..=12).contains(&num(5..7))
        && (1..=31).contains(&num(8..10))
        && num(11..13) <= 23
        && num(14..16) <= 59
        && num(17..19) <= 60
}
