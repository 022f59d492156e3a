//! Domain orchestration
//!
//! [`PetService`] is the only component that decides whether a mutation
//! is legal. Each public operation is one logical transaction: validate
//! and authorize, mutate the registry, append the matching ledger event
//! to the pool. Expected failures (unknown pet, ownership mismatch,
//! wrong lifecycle state) collapse to `false`/`None` and are not
//! distinguished to the caller.

use crate::clock;
use crate::core::{Block, ChainError, Ledger, Transaction};
use crate::crypto::{hashed_key, EcdsaVerifier, SignatureVerifier};
use crate::mining::{
    Miner, MiningStats, TransactionPool, TransferError, MINING_DIFFICULTY, MINING_SENDER,
};
use crate::registry::{PetData, PetProfile, PetRegistry, VetRecordData};
use log::info;
use serde::Serialize;

/// Reward credited to this node for mining a block.
pub const MINING_REWARD: f64 = 1.0;

/// Microchip value recorded when registration data carries none.
pub const NO_CHIP: &str = "NO_CHIP";

/// One entry of a pet's ledger history.
///
/// Mined entries carry the containing block's ordinal and timestamp;
/// unconfirmed entries carry a `"pending"` status marker instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    Mined {
        #[serde(flatten)]
        transaction: Transaction,
        block_number: u64,
        block_timestamp: f64,
    },
    Pending {
        #[serde(flatten)]
        transaction: Transaction,
        status: &'static str,
    },
}

impl HistoryEntry {
    fn pending(transaction: Transaction) -> Self {
        Self::Pending {
            transaction,
            status: "pending",
        }
    }

    pub fn transaction(&self) -> &Transaction {
        match self {
            Self::Mined { transaction, .. } | Self::Pending { transaction, .. } => transaction,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn block_number(&self) -> Option<u64> {
        match self {
            Self::Mined { block_number, .. } => Some(*block_number),
            Self::Pending { .. } => None,
        }
    }
}

/// Point-in-time aggregate over the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_pets: usize,
    pub active_pets: usize,
    pub lost_pets: usize,
    pub total_vet_records: usize,
    pub total_views: u64,
}

/// Point-in-time aggregate over the ledger and pool.
#[derive(Debug, Clone, Serialize)]
pub struct ChainStats {
    pub total_blocks: usize,
    pub total_transactions: usize,
    pub pending_transactions: usize,
    pub avg_transactions_per_block: f64,
    pub difficulty: usize,
    pub mining_reward: f64,
}

/// The orchestrator: ledger + pool + registry + authorization rules,
/// wired as one explicitly constructed, explicitly owned value.
pub struct PetService {
    ledger: Ledger,
    pool: TransactionPool,
    registry: PetRegistry,
    miner: Miner,
    node_id: String,
}

impl PetService {
    pub fn new() -> Self {
        Self::with_difficulty(MINING_DIFFICULTY)
    }

    pub fn with_difficulty(difficulty: usize) -> Self {
        Self::with_verifier(difficulty, Box::new(EcdsaVerifier))
    }

    /// Build a service around a caller-supplied signature verifier.
    pub fn with_verifier(difficulty: usize, verifier: Box<dyn SignatureVerifier>) -> Self {
        Self {
            ledger: Ledger::new(difficulty),
            pool: TransactionPool::new(verifier),
            registry: PetRegistry::new(),
            miner: Miner::new(difficulty),
            node_id: hex::encode(rand::random::<[u8; 16]>()),
        }
    }

    /// Identity credited with mining rewards on this node.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    // -------------------------------------------------------------
    // Registry operations (each one: authorize, mutate, emit event)
    // -------------------------------------------------------------

    /// Register a pet. Always succeeds; missing fields take defaults.
    pub fn register_pet(&mut self, mut data: PetData, owner_public_key: &str) -> String {
        if data.microchip_id.is_empty() {
            data.microchip_id = NO_CHIP.to_string();
        }
        let microchip_id = data.microchip_id.clone();

        let pet_id = self.registry.generate_pet_id(&microchip_id, owner_public_key);
        let profile = self.registry.create_profile(&pet_id, data, owner_public_key);

        let event = Transaction::PetRegistration {
            pet_id: pet_id.clone(),
            pet_name: profile.name.clone(),
            species: profile.species.clone(),
            microchip_id,
            owner_key_hash: hashed_key(owner_public_key),
            timestamp: clock::epoch_seconds(),
        };
        self.pool.push(event);

        info!("Registered pet {}", pet_id);
        pet_id
    }

    /// Append a vet record; owner-gated by exact raw-key equality.
    pub fn add_vet_record(
        &mut self,
        pet_id: &str,
        data: VetRecordData,
        owner_public_key: &str,
    ) -> Option<String> {
        let pet = self.registry.get(pet_id)?;
        if pet.owner_public_key != owner_public_key {
            return None;
        }

        let record = self.registry.add_vet_record(pet_id, data)?;

        self.pool.push(Transaction::VetRecord {
            pet_id: pet_id.to_string(),
            record_id: record.record_id.clone(),
            record_type: record.record_type.clone(),
            vet_name: record.vet_name.clone(),
            owner_key_hash: hashed_key(owner_public_key),
            timestamp: clock::epoch_seconds(),
        });

        Some(record.record_id)
    }

    /// Record a profile view. Any viewer may trigger; fails only if the
    /// pet is unknown. The emitted event carries the post-increment
    /// counter, so replaying events alone reconstructs `view_count`.
    pub fn view_profile(&mut self, pet_id: &str, viewer_public_key: &str) -> bool {
        if self.registry.get(pet_id).is_none() {
            return false;
        }

        let view_count = self.registry.increment_view_count(pet_id);

        self.pool.push(Transaction::ProfileView {
            pet_id: pet_id.to_string(),
            viewer_key_hash: hashed_key(viewer_public_key),
            view_count,
            timestamp: clock::epoch_seconds(),
        });

        true
    }

    /// Mark a pet lost; owner-gated.
    pub fn report_lost(
        &mut self,
        pet_id: &str,
        owner_public_key: &str,
        location: &str,
        description: &str,
    ) -> bool {
        let Some(pet) = self.registry.get(pet_id) else {
            return false;
        };
        if pet.owner_public_key != owner_public_key {
            return false;
        }

        self.registry.mark_lost(pet_id, location, description);

        self.pool.push(Transaction::PetLost {
            pet_id: pet_id.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            owner_key_hash: hashed_key(owner_public_key),
            timestamp: clock::epoch_seconds(),
        });

        true
    }

    /// Mark a pet found. Gated only on the pet currently being Lost;
    /// the finder needs no credentials.
    pub fn report_found(
        &mut self,
        pet_id: &str,
        finder_public_key: &str,
        finder_contact: &str,
    ) -> bool {
        let Some(pet) = self.registry.get(pet_id) else {
            return false;
        };
        if !pet.is_lost() {
            return false;
        }

        self.registry.mark_found(pet_id, finder_contact);

        self.pool.push(Transaction::PetFound {
            pet_id: pet_id.to_string(),
            finder_key_hash: hashed_key(finder_public_key),
            finder_contact: finder_contact.to_string(),
            timestamp: clock::epoch_seconds(),
        });

        true
    }

    // -------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------

    pub fn get_profile(&self, pet_id: &str) -> Option<&PetProfile> {
        self.registry.get(pet_id)
    }

    pub fn search(&self, query: Option<&str>, lost_only: bool) -> Vec<&PetProfile> {
        self.registry.search(query, lost_only)
    }

    /// A pet's full ledger history: transactions in mined blocks,
    /// oldest block first, then unconfirmed pool entries in insertion
    /// order. The mined-then-pending concatenation order is part of the
    /// contract.
    pub fn history(&self, pet_id: &str) -> Vec<HistoryEntry> {
        let mut entries = Vec::new();

        for block in self.ledger.blocks() {
            for tx in &block.transactions {
                if tx.pet_id() == Some(pet_id) {
                    entries.push(HistoryEntry::Mined {
                        transaction: tx.clone(),
                        block_number: block.block_number,
                        block_timestamp: block.timestamp,
                    });
                }
            }
        }

        for tx in self.pool.pending() {
            if tx.pet_id() == Some(pet_id) {
                entries.push(HistoryEntry::pending(tx.clone()));
            }
        }

        entries
    }

    /// Full-registry scan; consistent only at the instant of the scan.
    pub fn registry_stats(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();
        for pet in self.registry.iter() {
            stats.total_pets += 1;
            if pet.is_lost() {
                stats.lost_pets += 1;
            } else {
                stats.active_pets += 1;
            }
            stats.total_vet_records += pet.vet_records.len();
            stats.total_views += pet.view_count;
        }
        stats
    }

    pub fn chain_stats(&self) -> ChainStats {
        let total_blocks = self.ledger.len();
        let total_transactions: usize = self
            .ledger
            .blocks()
            .iter()
            .map(|b| b.transactions.len())
            .sum();

        ChainStats {
            total_blocks,
            total_transactions,
            pending_transactions: self.pool.len(),
            avg_transactions_per_block: if total_blocks > 0 {
                total_transactions as f64 / total_blocks as f64
            } else {
                0.0
            },
            difficulty: self.ledger.difficulty(),
            mining_reward: MINING_REWARD,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        self.ledger.blocks()
    }

    pub fn last_block(&self) -> &Block {
        self.ledger.last_block()
    }

    pub fn pending(&self) -> &[Transaction] {
        self.pool.pending()
    }

    pub fn validate_chain(&self) -> Result<(), ChainError> {
        self.ledger.validate()
    }

    // -------------------------------------------------------------
    // Ledger operations
    // -------------------------------------------------------------

    /// Submit a value transfer to the pool. Returns the prospective
    /// next block number on success, rejection on any verification
    /// failure.
    pub fn submit_transfer(
        &mut self,
        sender_public_key: &str,
        recipient_public_key: &str,
        signature_hex: &str,
        amount: f64,
    ) -> Result<u64, TransferError> {
        self.pool.submit_transfer(
            sender_public_key,
            recipient_public_key,
            signature_hex,
            amount,
            self.ledger.next_block_number(),
        )
    }

    /// Mine the pool into a new block.
    ///
    /// The mining reward is pooled before the nonce search so the
    /// recorded nonce is valid over the block's own transactions and
    /// chain validation can recheck it.
    pub fn mine_next_block(&mut self) -> (Block, MiningStats) {
        let prospective = self.ledger.next_block_number();
        let _ = self.pool.submit_transfer(
            MINING_SENDER,
            &self.node_id,
            "",
            MINING_REWARD,
            prospective,
        );

        let snapshot = self.pool.snapshot();
        let last_hash = self.ledger.last_block().hash();
        let (nonce, stats) = self.miner.mine(&snapshot, &last_hash);

        let block = self
            .ledger
            .create_block(nonce, last_hash, &mut self.pool)
            .clone();

        info!(
            "Mined block {} with {} transaction(s) in {}ms",
            block.block_number,
            block.transactions.len(),
            stats.time_ms
        );

        (block, stats)
    }
}

impl Default for PetService {
    fn default() -> Self {
        Self::new()
    }
}
