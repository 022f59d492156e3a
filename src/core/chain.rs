//! The append-only ledger
//!
//! An ordered sequence of hash-linked blocks. Blocks are only ever
//! appended; there is no deletion or in-place mutation of confirmed
//! history.

use crate::core::block::Block;
use crate::core::transaction::Transaction;
use crate::crypto::{meets_difficulty, pow_guess_hash};
use crate::mining::TransactionPool;
use serde::Serialize;
use thiserror::Error;

/// Chain validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ChainError {
    #[error("Block {block_number}: previous_hash does not match predecessor")]
    BrokenLink { block_number: u64 },
    #[error("Block {block_number}: non-sequential block number")]
    NonSequentialNumber { block_number: u64 },
    #[error("Block {block_number}: nonce fails the difficulty predicate")]
    InvalidProofOfWork { block_number: u64 },
}

/// The chain of blocks, starting at the genesis block.
#[derive(Debug, Clone, Serialize)]
pub struct Ledger {
    blocks: Vec<Block>,
    #[serde(skip)]
    difficulty: usize,
}

impl Ledger {
    /// Create a ledger seeded with the genesis block.
    pub fn new(difficulty: usize) -> Self {
        Self {
            blocks: vec![Block::genesis()],
            difficulty,
        }
    }

    /// The most recently appended block.
    pub fn last_block(&self) -> &Block {
        // A ledger always holds at least the genesis block.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Ordinal the next created block will receive.
    pub fn next_block_number(&self) -> u64 {
        self.blocks.len() as u64 + 1
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Snapshot the pool into a new block and append it.
    ///
    /// The pool drain and the chain append happen inside this single
    /// call; no transaction can be observed outside both, and none can
    /// appear in two blocks.
    pub fn create_block(
        &mut self,
        nonce: u64,
        previous_hash: String,
        pool: &mut TransactionPool,
    ) -> &Block {
        let transactions = pool.drain_all();
        let block = Block::new(self.next_block_number(), transactions, nonce, previous_hash);
        log::debug!(
            "Appending block {} with {} transaction(s)",
            block.block_number,
            block.transactions.len()
        );
        self.blocks.push(block);
        self.last_block()
    }

    /// Validate hash linkage, ordinal sequence and proof of work.
    ///
    /// Genesis (nonce 0, previous hash "00") is exempt from the
    /// difficulty predicate.
    pub fn validate(&self) -> Result<(), ChainError> {
        for (i, block) in self.blocks.iter().enumerate().skip(1) {
            let previous = &self.blocks[i - 1];

            if block.block_number != previous.block_number + 1 {
                return Err(ChainError::NonSequentialNumber {
                    block_number: block.block_number,
                });
            }

            if block.previous_hash != previous.hash() {
                return Err(ChainError::BrokenLink {
                    block_number: block.block_number,
                });
            }

            if !self.nonce_is_valid(&block.transactions, &block.previous_hash, block.nonce) {
                return Err(ChainError::InvalidProofOfWork {
                    block_number: block.block_number,
                });
            }
        }

        Ok(())
    }

    fn nonce_is_valid(&self, transactions: &[Transaction], last_hash: &str, nonce: u64) -> bool {
        meets_difficulty(
            &pow_guess_hash(transactions, last_hash, nonce),
            self.difficulty,
        )
    }
}
