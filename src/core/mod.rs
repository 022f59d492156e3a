//! Core ledger components
//!
//! This module contains the fundamental building blocks:
//! - Transactions (tagged registry events and value transfers)
//! - Blocks (pool snapshots with recomputed content hashes)
//! - Ledger (append-only hash-linked chain with validation)

pub mod block;
pub mod chain;
pub mod transaction;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use chain::{ChainError, Ledger};
pub use transaction::Transaction;
