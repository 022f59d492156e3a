//! Pet registry: the mutable projection of ledger events
//!
//! Profiles, vet records and the authorization-free keyed store.
//! Ownership gating lives in the service layer.

pub mod profile;
pub mod store;

pub use profile::{PetData, PetProfile, PetStatus, VetRecord, VetRecordData};
pub use store::{PetRegistry, DEFAULT_SPECIES, PET_ID_LEN, RECORD_ID_LEN};
