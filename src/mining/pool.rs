//! Unconfirmed-transaction pool
//!
//! Holds events accepted but not yet included in a mined block.
//! Insertion order is preserved and the whole pool is flushed into the
//! next block; there is no deduplication, fee ordering or size bound.

use crate::clock;
use crate::core::transaction::Transaction;
use crate::crypto::{hashed_key, SignatureVerifier, TransferClaim};
use thiserror::Error;

/// Distinguished sender identity for mining rewards; bypasses signature
/// verification.
pub const MINING_SENDER: &str = "BLOCKCHAIN_REWARD";

/// Transfer submission errors
#[derive(Error, Debug, PartialEq)]
pub enum TransferError {
    #[error("signature verification failed")]
    Rejected,
}

/// FIFO pool of unconfirmed transactions.
#[derive(Default)]
pub struct TransactionPool {
    entries: Vec<Transaction>,
    verifier: Option<Box<dyn SignatureVerifier>>,
}

impl std::fmt::Debug for TransactionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionPool")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl TransactionPool {
    /// Pool with a signature verifier wired in for value transfers.
    pub fn new(verifier: Box<dyn SignatureVerifier>) -> Self {
        Self {
            entries: Vec::new(),
            verifier: Some(verifier),
        }
    }

    /// Append an already-authorized event.
    pub fn push(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    /// Copy of the pool in insertion order, for mining isolation:
    /// the miner works on the snapshot while later submissions queue
    /// for the next block.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.entries.clone()
    }

    /// Unconfirmed transactions, insertion order.
    pub fn pending(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move every entry out, leaving the pool empty.
    pub fn drain_all(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.entries)
    }

    /// Submit a value transfer.
    ///
    /// The `MINING_SENDER` identity is appended unconditionally; any
    /// other sender must present a signature over the literal
    /// `(sender, recipient, amount)` tuple. Verification failures of
    /// every kind become [`TransferError::Rejected`] — nothing
    /// propagates past this boundary.
    ///
    /// On success returns `prospective_block`, the block number the
    /// transfer is expected to land in. Historical quirk: callers get
    /// a block ordinal, not a transaction identifier.
    pub fn submit_transfer(
        &mut self,
        sender_public_key: &str,
        recipient_public_key: &str,
        signature_hex: &str,
        amount: f64,
        prospective_block: u64,
    ) -> Result<u64, TransferError> {
        let transfer = Transaction::ValueTransfer {
            sender_key_hash: hashed_key(sender_public_key),
            recipient_key_hash: hashed_key(recipient_public_key),
            amount,
            timestamp: clock::epoch_seconds(),
        };

        if sender_public_key == MINING_SENDER {
            self.entries.push(transfer);
            return Ok(prospective_block);
        }

        let claim = TransferClaim {
            sender_public_key,
            recipient_public_key,
            amount,
        };
        let verified = self
            .verifier
            .as_ref()
            .map(|v| v.verify(&claim, signature_hex, sender_public_key))
            .unwrap_or(false);
        if !verified {
            log::warn!(
                "Rejected transfer from {}: signature verification failed",
                hashed_key(sender_public_key)
            );
            return Err(TransferError::Rejected);
        }

        self.entries.push(transfer);
        Ok(prospective_block)
    }
}
