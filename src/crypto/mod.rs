//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 hashing over canonical JSON
//! - Truncated one-way key digests
//! - ECDSA key management (secp256k1) behind a verifier capability

pub mod hash;
pub mod keys;

pub use hash::{
    canonical_json, content_hash, hashed_key, meets_difficulty, pow_guess_hash, sha256,
    sha256_hex, short_digest, KEY_DIGEST_LEN, UNKNOWN_KEY,
};
pub use keys::{
    public_key_from_hex, sign_message, verify_signature, EcdsaVerifier, KeyError, KeyPair,
    SignatureVerifier, TransferClaim,
};
