//! Content hashing for the ledger
//!
//! Provides SHA-256 based hashing over canonical JSON, used for block
//! hashes, proof-of-work guesses, and derived identifiers.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Number of hex characters in a truncated key digest.
pub const KEY_DIGEST_LEN: usize = 24;

/// Sentinel returned for an empty or absent credential.
pub const UNKNOWN_KEY: &str = "UNKNOWN_KEY";

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes SHA-256 hash and returns it as a hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Serializes a record to its canonical JSON form.
///
/// Object keys are sorted lexicographically (serde_json's default map is
/// ordered), so two semantically equal records always produce the same
/// bytes regardless of field declaration order.
pub fn canonical_json<T: Serialize>(record: &T) -> String {
    match serde_json::to_value(record) {
        Ok(value) => value.to_string(),
        Err(_) => String::new(),
    }
}

/// Hashes a composite record: canonical JSON, SHA-256, 64 lowercase hex.
pub fn content_hash<T: Serialize>(record: &T) -> String {
    sha256_hex(canonical_json(record).as_bytes())
}

/// One-way digest of a raw credential, truncated to 24 hex characters.
///
/// This is the only form of a key that may appear in transactions or be
/// shown to an untrusted reader. Empty input maps to a fixed sentinel.
pub fn hashed_key(raw_key: &str) -> String {
    if raw_key.is_empty() {
        return UNKNOWN_KEY.to_string();
    }
    let mut digest = sha256_hex(raw_key.as_bytes());
    digest.truncate(KEY_DIGEST_LEN);
    digest
}

/// Truncated hex digest for derived identifiers (pet ids, record ids).
pub fn short_digest(input: &str, len: usize) -> String {
    let mut digest = sha256_hex(input.as_bytes());
    digest.truncate(len);
    digest
}

/// The proof-of-work guess: canonical transactions ++ last hash ++ nonce.
///
/// Used both by the miner's search and by chain validation, so the two
/// can never drift apart.
pub fn pow_guess_hash<T: Serialize>(transactions: &[T], last_hash: &str, nonce: u64) -> String {
    let mut guess = canonical_json(&transactions);
    guess.push_str(last_hash);
    guess.push_str(&nonce.to_string());
    sha256_hex(guess.as_bytes())
}

/// Checks if a hex hash has `difficulty` leading ASCII '0' characters.
pub fn meets_difficulty(hash_hex: &str, difficulty: usize) -> bool {
    hash_hex.len() >= difficulty
        && hash_hex.as_bytes().iter().take(difficulty).all(|b| *b == b'0')
}
