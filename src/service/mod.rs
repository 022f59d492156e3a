//! Service layer: the domain orchestrator

pub mod orchestrator;

pub use orchestrator::{
    ChainStats, HistoryEntry, PetService, RegistryStats, MINING_REWARD, NO_CHIP,
};
