//! Block model for the ledger
//!
//! A block is an immutable snapshot of the unconfirmed pool, linked to
//! its predecessor by hash. The block's own hash is never stored; it is
//! recomputed from canonical content whenever needed, so a tampered
//! block cannot carry a stale cached hash.

use crate::clock;
use crate::core::transaction::Transaction;
use crate::crypto::content_hash;
use serde::{Deserialize, Serialize};

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "00";

/// A block in the ledger. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based, strictly increasing block ordinal
    pub block_number: u64,
    /// Creation time, fractional seconds since epoch
    pub timestamp: f64,
    /// Pool snapshot at creation, FIFO order
    pub transactions: Vec<Transaction>,
    /// Nonce found by the proof-of-work search
    pub nonce: u64,
    /// Hash of the preceding block ("00" for genesis)
    pub previous_hash: String,
}

impl Block {
    /// Assemble a block from a pool snapshot.
    pub fn new(
        block_number: u64,
        transactions: Vec<Transaction>,
        nonce: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            block_number,
            timestamp: clock::epoch_seconds(),
            transactions,
            nonce,
            previous_hash,
        }
    }

    /// The hardcoded first block: number 1, no transactions, nonce 0.
    pub fn genesis() -> Self {
        Self::new(1, Vec::new(), 0, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Content hash over all block fields, 64 lowercase hex chars.
    pub fn hash(&self) -> String {
        content_hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis();
        assert_eq!(genesis.block_number, 1);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.nonce, 0);
        assert!(genesis.transactions.is_empty());
    }

    #[test]
    fn test_hash_is_stable_and_hex64() {
        let block = Block::genesis();
        let hash = block.hash();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, block.hash());
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_covers_all_fields() {
        let block = Block::genesis();
        let original = block.hash();

        let mut tampered = block.clone();
        tampered.nonce += 1;
        assert_ne!(tampered.hash(), original);

        let mut tampered = block;
        tampered.transactions.push(Transaction::ValueTransfer {
            sender_key_hash: "a".into(),
            recipient_key_hash: "b".into(),
            amount: 1.0,
            timestamp: 0.0,
        });
        assert_ne!(tampered.hash(), original);
    }
}
