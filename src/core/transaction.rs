//! Ledger transactions
//!
//! Every mutation the registry accepts is mirrored by exactly one tagged
//! event appended to the unconfirmed pool. Raw credentials never appear
//! here — only their 24-hex truncated digests, which keeps the ledger
//! auditable without exposing identities.

use serde::{Deserialize, Serialize};

/// A ledger event, tagged on the wire as `{"type": "PET_REGISTRATION", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transaction {
    /// A pet profile was created.
    PetRegistration {
        pet_id: String,
        pet_name: String,
        species: String,
        microchip_id: String,
        owner_key_hash: String,
        timestamp: f64,
    },
    /// A veterinary record was appended by the owner.
    VetRecord {
        pet_id: String,
        record_id: String,
        record_type: String,
        vet_name: String,
        owner_key_hash: String,
        timestamp: f64,
    },
    /// A profile was viewed; carries the post-increment counter so the
    /// ledger alone reconstructs `view_count`.
    ProfileView {
        pet_id: String,
        viewer_key_hash: String,
        view_count: u64,
        timestamp: f64,
    },
    /// The owner reported the pet lost.
    PetLost {
        pet_id: String,
        location: String,
        description: String,
        owner_key_hash: String,
        timestamp: f64,
    },
    /// Anyone reported the pet found.
    PetFound {
        pet_id: String,
        finder_key_hash: String,
        finder_contact: String,
        timestamp: f64,
    },
    /// A signed value transfer (or an unsigned mining reward).
    ValueTransfer {
        sender_key_hash: String,
        recipient_key_hash: String,
        amount: f64,
        timestamp: f64,
    },
}

impl Transaction {
    /// The pet this event concerns, if any. Value transfers carry none.
    pub fn pet_id(&self) -> Option<&str> {
        match self {
            Transaction::PetRegistration { pet_id, .. }
            | Transaction::VetRecord { pet_id, .. }
            | Transaction::ProfileView { pet_id, .. }
            | Transaction::PetLost { pet_id, .. }
            | Transaction::PetFound { pet_id, .. } => Some(pet_id),
            Transaction::ValueTransfer { .. } => None,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            Transaction::PetRegistration { timestamp, .. }
            | Transaction::VetRecord { timestamp, .. }
            | Transaction::ProfileView { timestamp, .. }
            | Transaction::PetLost { timestamp, .. }
            | Transaction::PetFound { timestamp, .. }
            | Transaction::ValueTransfer { timestamp, .. } => *timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tag_names() {
        let tx = Transaction::PetRegistration {
            pet_id: "abcd".into(),
            pet_name: "Rex".into(),
            species: "dog".into(),
            microchip_id: "C1".into(),
            owner_key_hash: "deadbeef".into(),
            timestamp: 1.0,
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "PET_REGISTRATION");
        assert_eq!(value["pet_id"], "abcd");

        let transfer = Transaction::ValueTransfer {
            sender_key_hash: "a".into(),
            recipient_key_hash: "b".into(),
            amount: 1.0,
            timestamp: 2.0,
        };
        let value = serde_json::to_value(&transfer).unwrap();
        assert_eq!(value["type"], "VALUE_TRANSFER");
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = Transaction::PetFound {
            pet_id: "abcd".into(),
            finder_key_hash: "cafe".into(),
            finder_contact: "555-1234".into(),
            timestamp: 3.0,
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn test_pet_id_accessor() {
        let view = Transaction::ProfileView {
            pet_id: "p1".into(),
            viewer_key_hash: "v".into(),
            view_count: 4,
            timestamp: 0.0,
        };
        assert_eq!(view.pet_id(), Some("p1"));

        let transfer = Transaction::ValueTransfer {
            sender_key_hash: "a".into(),
            recipient_key_hash: "b".into(),
            amount: 1.0,
            timestamp: 0.0,
        };
        assert_eq!(transfer.pet_id(), None);
    }
}
