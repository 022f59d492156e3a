//! Pawchain: a pet identity registry on an append-only ledger
//!
//! This crate maintains a hash-linked transaction ledger and derives a
//! mutable pet registry by replaying ledger events. It provides:
//! - Canonical-JSON content hashing (order-independent SHA-256 digests)
//! - An append-only block chain with linkage and proof-of-work validation
//! - A brute-force nonce miner with a cancellable variant
//! - A FIFO unconfirmed-transaction pool with signed value transfers
//! - A pet registry projection with ownership-gated lifecycle events
//! - A service layer coupling ledger, pool and registry
//!
//! # Example
//!
//! ```rust
//! use pawchain::registry::PetData;
//! use pawchain::service::PetService;
//!
//! let mut service = PetService::new();
//!
//! let pet_id = service.register_pet(
//!     PetData {
//!         name: "Rex".into(),
//!         microchip_id: "CHIP-001".into(),
//!         ..PetData::default()
//!     },
//!     "owner_public_key",
//! );
//!
//! let (block, stats) = service.mine_next_block();
//! println!("Mined block {} in {}ms", block.block_number, stats.time_ms);
//!
//! assert!(service.get_profile(&pet_id).is_some());
//! assert!(service.validate_chain().is_ok());
//! ```

pub mod cli;
pub mod clock;
pub mod core;
pub mod crypto;
pub mod mining;
pub mod registry;
pub mod service;

// Re-export commonly used types
pub use crate::core::{Block, ChainError, Ledger, Transaction};
pub use crate::crypto::{EcdsaVerifier, KeyPair, SignatureVerifier};
pub use crate::mining::{Miner, MiningStats, TransactionPool, TransferError, MINING_SENDER};
pub use crate::registry::{PetData, PetProfile, PetRegistry, PetStatus, VetRecord, VetRecordData};
pub use crate::service::{ChainStats, HistoryEntry, PetService, RegistryStats, MINING_REWARD};
