//! Pet profile data model
//!
//! Profiles are the mutable projection of the ledger's registration and
//! lifecycle events. The raw owner key is the authorization secret: it
//! is stored but never serialized, so no exported view can leak it.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Active,
    Lost,
}

/// Registration input. Missing fields take defaults downstream
/// (species "dog", microchip "NO_CHIP").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub microchip_id: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_phone: String,
    #[serde(default)]
    pub owner_email: String,
}

/// Veterinary-record input supplied by the owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VetRecordData {
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub vet_name: String,
    #[serde(default)]
    pub vet_clinic: String,
    #[serde(default)]
    pub vet_phone: String,
    #[serde(default)]
    pub procedure: String,
    #[serde(default)]
    pub notes: String,
    /// Defaults to the submission time when absent.
    #[serde(default)]
    pub date: Option<f64>,
    #[serde(default)]
    pub next_due_date: Option<String>,
}

/// A stored veterinary record; richer than the ledger's VET_RECORD event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetRecord {
    /// 12 hex chars, derived from the pet id and the submission time
    pub record_id: String,
    pub record_type: String,
    pub vet_name: String,
    pub vet_clinic: String,
    pub vet_phone: String,
    pub procedure: String,
    pub notes: String,
    pub date: f64,
    pub next_due_date: Option<String>,
    pub timestamp: f64,
}

/// A registered pet. Created once, never deleted; mutated in place by
/// vet-record appends, view increments, and lost/found toggles.
#[derive(Debug, Clone, Serialize)]
pub struct PetProfile {
    /// 16 hex chars, derived at registration
    pub pet_id: String,
    pub name: String,
    pub breed: String,
    pub species: String,
    pub birth_date: String,
    pub color: String,
    pub weight: String,
    pub microchip_id: String,
    pub photo: String,
    /// Authorization secret; compared byte-for-byte on gated operations
    /// and excluded from every serialized view.
    #[serde(skip_serializing)]
    pub owner_public_key: String,
    /// Truncated digest of the owner key, safe to expose.
    pub owner_key_hash: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: String,
    pub registered_at: f64,
    pub vet_records: Vec<VetRecord>,
    pub view_count: u64,
    pub status: PetStatus,
    pub lost_location: Option<String>,
    pub lost_description: Option<String>,
    pub lost_since: Option<f64>,
    pub found_by: Option<String>,
    pub found_at: Option<f64>,
}

impl PetProfile {
    pub fn is_lost(&self) -> bool {
        self.status == PetStatus::Lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PetStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&PetStatus::Lost).unwrap(), "\"lost\"");
    }

    #[test]
    fn test_pet_data_accepts_sparse_json() {
        let data: PetData = serde_json::from_str(r#"{"name": "Rex"}"#).unwrap();
        assert_eq!(data.name, "Rex");
        assert!(data.species.is_empty());
        assert!(data.microchip_id.is_empty());
    }
}
