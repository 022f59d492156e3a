//! Mining module: proof-of-work search and the unconfirmed pool

pub mod miner;
pub mod pool;

pub use miner::{Miner, MiningStats, MINING_DIFFICULTY};
pub use pool::{TransactionPool, TransferError, MINING_SENDER};
