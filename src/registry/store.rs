//! The pet registry store
//!
//! A deliberately dumb keyed store: every operation here is an
//! unconditional field update gated only on the pet id existing.
//! Ownership and lifecycle authorization live in the service layer,
//! never here.

use crate::clock;
use crate::crypto::{hashed_key, short_digest};
use crate::registry::profile::{PetData, PetProfile, PetStatus, VetRecord, VetRecordData};
use std::collections::HashMap;

/// Length of a derived pet identifier, in hex characters.
pub const PET_ID_LEN: usize = 16;

/// Length of a derived vet-record identifier, in hex characters.
pub const RECORD_ID_LEN: usize = 12;

/// Species applied when registration data carries none.
pub const DEFAULT_SPECIES: &str = "dog";

/// Mutable projection keyed by pet id.
#[derive(Debug, Default)]
pub struct PetRegistry {
    pets: HashMap<String, PetProfile>,
}

impl PetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a fresh pet id from the microchip, the owner key and the
    /// current instant. The time component means re-registering the
    /// same microchip yields a different id; re-registration history is
    /// supported, deduplication is not.
    pub fn generate_pet_id(&self, microchip_id: &str, owner_public_key: &str) -> String {
        let combined = format!(
            "{}_{}_{}",
            microchip_id,
            owner_public_key,
            clock::epoch_nanos()
        );
        short_digest(&combined, PET_ID_LEN)
    }

    /// Create and store a profile under `pet_id`, applying defaults.
    /// Stores both the raw owner key and its exposable digest.
    pub fn create_profile(
        &mut self,
        pet_id: &str,
        data: PetData,
        owner_public_key: &str,
    ) -> &PetProfile {
        let species = if data.species.is_empty() {
            DEFAULT_SPECIES.to_string()
        } else {
            data.species
        };

        let profile = PetProfile {
            pet_id: pet_id.to_string(),
            name: data.name,
            breed: data.breed,
            species,
            birth_date: data.birth_date,
            color: data.color,
            weight: data.weight,
            microchip_id: data.microchip_id,
            photo: data.photo,
            owner_public_key: owner_public_key.to_string(),
            owner_key_hash: hashed_key(owner_public_key),
            owner_name: data.owner_name,
            owner_phone: data.owner_phone,
            owner_email: data.owner_email,
            registered_at: clock::epoch_seconds(),
            vet_records: Vec::new(),
            view_count: 0,
            status: PetStatus::Active,
            lost_location: None,
            lost_description: None,
            lost_since: None,
            found_by: None,
            found_at: None,
        };

        self.pets.insert(pet_id.to_string(), profile);
        &self.pets[pet_id]
    }

    /// Append a vet record; None if the pet is unknown.
    pub fn add_vet_record(&mut self, pet_id: &str, data: VetRecordData) -> Option<VetRecord> {
        let pet = self.pets.get_mut(pet_id)?;
        let now = clock::epoch_seconds();

        let record = VetRecord {
            record_id: short_digest(
                &format!("{}_{}", pet_id, clock::epoch_nanos()),
                RECORD_ID_LEN,
            ),
            record_type: data.record_type,
            vet_name: data.vet_name,
            vet_clinic: data.vet_clinic,
            vet_phone: data.vet_phone,
            procedure: data.procedure,
            notes: data.notes,
            date: data.date.unwrap_or(now),
            next_due_date: data.next_due_date,
            timestamp: now,
        };

        pet.vet_records.push(record.clone());
        Some(record)
    }

    /// Flip a pet to Lost. No ownership or prior-status checks here.
    pub fn mark_lost(&mut self, pet_id: &str, location: &str, description: &str) -> bool {
        let Some(pet) = self.pets.get_mut(pet_id) else {
            return false;
        };
        pet.status = PetStatus::Lost;
        pet.lost_location = Some(location.to_string());
        pet.lost_description = Some(description.to_string());
        pet.lost_since = Some(clock::epoch_seconds());
        true
    }

    /// Flip a pet back to Active. No ownership or prior-status checks.
    pub fn mark_found(&mut self, pet_id: &str, found_by: &str) -> bool {
        let Some(pet) = self.pets.get_mut(pet_id) else {
            return false;
        };
        pet.status = PetStatus::Active;
        pet.found_by = Some(found_by.to_string());
        pet.found_at = Some(clock::epoch_seconds());
        true
    }

    /// Bump and return the view counter; 0 for an unknown pet.
    pub fn increment_view_count(&mut self, pet_id: &str) -> u64 {
        match self.pets.get_mut(pet_id) {
            Some(pet) => {
                pet.view_count += 1;
                pet.view_count
            }
            None => 0,
        }
    }

    /// Linear scan. `lost_only` filters to Lost pets first; a query then
    /// matches case-insensitively as a substring of the name, microchip,
    /// breed, or the pet id itself.
    pub fn search(&self, query: Option<&str>, lost_only: bool) -> Vec<&PetProfile> {
        self.pets
            .values()
            .filter(|pet| !lost_only || pet.is_lost())
            .filter(|pet| match query {
                None => true,
                Some(q) => {
                    let q = q.to_lowercase();
                    pet.name.to_lowercase().contains(&q)
                        || pet.microchip_id.to_lowercase().contains(&q)
                        || pet.breed.to_lowercase().contains(&q)
                        || pet.pet_id.to_lowercase().contains(&q)
                }
            })
            .collect()
    }

    pub fn get(&self, pet_id: &str) -> Option<&PetProfile> {
        self.pets.get(pet_id)
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PetProfile> {
        self.pets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rex() -> PetData {
        PetData {
            name: "Rex".into(),
            breed: "Labrador".into(),
            microchip_id: "CHIP-001".into(),
            ..PetData::default()
        }
    }

    #[test]
    fn test_generate_pet_id_shape_and_uniqueness() {
        let registry = PetRegistry::new();
        let a = registry.generate_pet_id("CHIP-001", "K1");
        let b = registry.generate_pet_id("CHIP-001", "K1");

        assert_eq!(a.len(), PET_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        // Same microchip and owner, different instant, different id.
        assert_ne!(a, b);
    }

    #[test]
    fn test_create_profile_applies_defaults() {
        let mut registry = PetRegistry::new();
        let profile = registry.create_profile("id1", rex(), "K1");

        assert_eq!(profile.species, DEFAULT_SPECIES);
        assert_eq!(profile.status, PetStatus::Active);
        assert_eq!(profile.view_count, 0);
        assert_eq!(profile.owner_public_key, "K1");
        assert_eq!(profile.owner_key_hash, hashed_key("K1"));
    }

    #[test]
    fn test_profile_serialization_omits_raw_owner_key() {
        let mut registry = PetRegistry::new();
        registry.create_profile("id1", rex(), "SECRET_OWNER_KEY");

        let json = serde_json::to_string(registry.get("id1").unwrap()).unwrap();
        assert!(!json.contains("SECRET_OWNER_KEY"));
        assert!(json.contains(&hashed_key("SECRET_OWNER_KEY")));
    }

    #[test]
    fn test_add_vet_record_unknown_pet() {
        let mut registry = PetRegistry::new();
        assert!(registry
            .add_vet_record("missing", VetRecordData::default())
            .is_none());
    }

    #[test]
    fn test_add_vet_record_appends() {
        let mut registry = PetRegistry::new();
        registry.create_profile("id1", rex(), "K1");

        let record = registry
            .add_vet_record(
                "id1",
                VetRecordData {
                    record_type: "vaccination".into(),
                    vet_name: "Dr. Patel".into(),
                    ..VetRecordData::default()
                },
            )
            .unwrap();

        assert_eq!(record.record_id.len(), RECORD_ID_LEN);
        assert_eq!(registry.get("id1").unwrap().vet_records.len(), 1);
        assert_eq!(registry.get("id1").unwrap().vet_records[0], record);
    }

    #[test]
    fn test_lost_found_field_updates() {
        let mut registry = PetRegistry::new();
        registry.create_profile("id1", rex(), "K1");

        assert!(registry.mark_lost("id1", "the park", "red collar"));
        let pet = registry.get("id1").unwrap();
        assert!(pet.is_lost());
        assert_eq!(pet.lost_location.as_deref(), Some("the park"));
        assert!(pet.lost_since.is_some());

        assert!(registry.mark_found("id1", "555-1234"));
        let pet = registry.get("id1").unwrap();
        assert_eq!(pet.status, PetStatus::Active);
        assert_eq!(pet.found_by.as_deref(), Some("555-1234"));
        assert!(pet.found_at.is_some());

        assert!(!registry.mark_lost("missing", "", ""));
        assert!(!registry.mark_found("missing", ""));
    }

    #[test]
    fn test_mark_lost_twice_is_idempotent() {
        let mut registry = PetRegistry::new();
        registry.create_profile("id1", rex(), "K1");

        assert!(registry.mark_lost("id1", "a", "b"));
        assert!(registry.mark_lost("id1", "c", "d"));
        let pet = registry.get("id1").unwrap();
        assert!(pet.is_lost());
        assert_eq!(pet.lost_location.as_deref(), Some("c"));
    }

    #[test]
    fn test_increment_view_count() {
        let mut registry = PetRegistry::new();
        registry.create_profile("id1", rex(), "K1");

        assert_eq!(registry.increment_view_count("id1"), 1);
        assert_eq!(registry.increment_view_count("id1"), 2);
        assert_eq!(registry.increment_view_count("missing"), 0);
    }

    #[test]
    fn test_search_empty_registry() {
        let registry = PetRegistry::new();
        assert!(registry.search(None, false).is_empty());
        assert!(registry.search(Some("rex"), true).is_empty());
    }

    #[test]
    fn test_search_substring_or_match() {
        let mut registry = PetRegistry::new();
        registry.create_profile("aaaa0000bbbb1111", rex(), "K1");
        registry.create_profile(
            "cccc2222dddd3333",
            PetData {
                name: "Whiskers".into(),
                breed: "Siamese".into(),
                species: "cat".into(),
                microchip_id: "CHIP-777".into(),
                ..PetData::default()
            },
            "K2",
        );

        // Case-insensitive name match.
        assert_eq!(registry.search(Some("REX"), false).len(), 1);
        // Microchip match.
        assert_eq!(registry.search(Some("777"), false).len(), 1);
        // Breed match.
        assert_eq!(registry.search(Some("siam"), false).len(), 1);
        // Pet-id substring match, not a prefix match.
        assert_eq!(registry.search(Some("dddd"), false).len(), 1);
        // No match.
        assert!(registry.search(Some("goldfish"), false).is_empty());
        // No query: everything.
        assert_eq!(registry.search(None, false).len(), 2);
    }

    #[test]
    fn test_search_lost_only_filter() {
        let mut registry = PetRegistry::new();
        registry.create_profile("id1", rex(), "K1");
        registry.create_profile(
            "id2",
            PetData {
                name: "Rexina".into(),
                ..PetData::default()
            },
            "K2",
        );
        registry.mark_lost("id2", "", "");

        assert_eq!(registry.search(None, true).len(), 1);
        assert_eq!(registry.search(Some("rex"), true).len(), 1);
        assert_eq!(registry.search(Some("rex"), false).len(), 2);
    }
}
