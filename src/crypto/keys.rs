//! ECDSA key management and the signature-verification capability
//!
//! Key pairs use the secp256k1 elliptic curve. Verification is exposed
//! behind the [`SignatureVerifier`] trait so the ledger core consumes it
//! as a capability: implementations must never panic past the boundary,
//! every failure collapses to `false`.

use rand::rngs::OsRng;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use thiserror::Error;

use super::hash::{canonical_json, sha256};

/// Errors that can occur during key operations
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Secp256k1 error: {0}")]
    Secp256k1Error(#[from] secp256k1::Error),
}

/// The message a value-transfer signature covers: the literal
/// `(sender, recipient, amount)` tuple, canonically serialized.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TransferClaim<'a> {
    pub sender_public_key: &'a str,
    pub recipient_public_key: &'a str,
    pub amount: f64,
}

impl TransferClaim<'_> {
    /// Canonical bytes to sign or verify.
    pub fn message_bytes(&self) -> Vec<u8> {
        canonical_json(self).into_bytes()
    }
}

/// Signature verification as consumed by the transaction pool.
///
/// `verify` must be total: malformed hex, unknown keys and verifier
/// internals all surface as `false`, never as a panic or an error type.
pub trait SignatureVerifier {
    fn verify(&self, claim: &TransferClaim<'_>, signature_hex: &str, public_key_hex: &str)
        -> bool;
}

/// secp256k1-backed [`SignatureVerifier`].
pub struct EcdsaVerifier;

impl SignatureVerifier for EcdsaVerifier {
    fn verify(
        &self,
        claim: &TransferClaim<'_>,
        signature_hex: &str,
        public_key_hex: &str,
    ) -> bool {
        let Ok(public_key) = public_key_from_hex(public_key_hex) else {
            return false;
        };
        let Ok(signature_bytes) = hex::decode(signature_hex) else {
            return false;
        };
        verify_signature(&public_key, &claim.message_bytes(), &signature_bytes)
            .unwrap_or(false)
    }
}

/// A key pair consisting of a private key and its corresponding public key
#[derive(Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut OsRng);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create a key pair from a hex-encoded private key
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPrivateKey)?;
        let secret_key =
            SecretKey::from_slice(&bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        let secp = Secp256k1::new();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        Ok(Self {
            secret_key,
            public_key,
        })
    }

    /// Get the private key as a hex string
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Get the public key as a hex string (compressed format)
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key.serialize())
    }

    /// Sign a transfer claim, returning the compact signature as hex.
    pub fn sign_transfer(&self, claim: &TransferClaim<'_>) -> Result<String, KeyError> {
        let signature = sign_message(&self.secret_key, &claim.message_bytes())?;
        Ok(hex::encode(signature))
    }
}

/// Parse a public key from hex string
pub fn public_key_from_hex(hex_key: &str) -> Result<PublicKey, KeyError> {
    let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPublicKey)?;
    PublicKey::from_slice(&bytes).map_err(|_| KeyError::InvalidPublicKey)
}

/// Sign a message with a secret key (message is hashed to 32 bytes first)
pub fn sign_message(secret_key: &SecretKey, message: &[u8]) -> Result<Vec<u8>, KeyError> {
    let secp = Secp256k1::new();
    let hash = sha256(message);
    let message = Message::from_digest_slice(&hash)?;
    let signature = secp.sign_ecdsa(&message, secret_key);
    Ok(signature.serialize_compact().to_vec())
}

/// Verify a compact signature against a public key
pub fn verify_signature(
    public_key: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, KeyError> {
    let secp = Secp256k1::new();
    let hash = sha256(message);
    let message = Message::from_digest_slice(&hash)?;
    let sig = secp256k1::ecdsa::Signature::from_compact(signature)
        .map_err(|_| KeyError::InvalidSignature)?;

    match secp.verify_ecdsa(&message, &sig, public_key) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_generation() {
        let kp = KeyPair::generate();
        assert!(!kp.private_key_hex().is_empty());
        assert!(!kp.public_key_hex().is_empty());
    }

    #[test]
    fn test_key_pair_from_hex() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::from_private_key_hex(&kp1.private_key_hex()).unwrap();
        assert_eq!(kp1.public_key_hex(), kp2.public_key_hex());
    }

    #[test]
    fn test_sign_and_verify_transfer() {
        let kp = KeyPair::generate();
        let sender_hex = kp.public_key_hex();
        let claim = TransferClaim {
            sender_public_key: &sender_hex,
            recipient_public_key: "recipient",
            amount: 10.0,
        };

        let signature = kp.sign_transfer(&claim).unwrap();
        assert!(EcdsaVerifier.verify(&claim, &signature, &sender_hex));
    }

    #[test]
    fn test_verify_rejects_tampered_amount() {
        let kp = KeyPair::generate();
        let sender_hex = kp.public_key_hex();
        let claim = TransferClaim {
            sender_public_key: &sender_hex,
            recipient_public_key: "recipient",
            amount: 10.0,
        };
        let signature = kp.sign_transfer(&claim).unwrap();

        let tampered = TransferClaim {
            amount: 1000.0,
            ..claim
        };
        assert!(!EcdsaVerifier.verify(&tampered, &signature, &sender_hex));
    }

    #[test]
    fn test_verify_never_panics_on_garbage() {
        let claim = TransferClaim {
            sender_public_key: "s",
            recipient_public_key: "r",
            amount: 1.0,
        };
        assert!(!EcdsaVerifier.verify(&claim, "not-hex!", "also not hex"));
        assert!(!EcdsaVerifier.verify(&claim, "abcdef", "abcdef"));
    }
}
