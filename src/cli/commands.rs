//! CLI command handlers

use crate::crypto::KeyPair;
use crate::registry::{PetData, VetRecordData};
use crate::service::PetService;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Walk the full service surface on a fresh in-memory ledger:
/// register, mine, view, lose, find, and print the audit trail.
pub fn run_demo(difficulty: usize) -> CliResult<()> {
    let mut service = PetService::with_difficulty(difficulty);
    let owner = KeyPair::generate();
    let owner_key = owner.public_key_hex();

    println!("🐾 Registering Rex...");
    let pet_id = service.register_pet(
        PetData {
            name: "Rex".into(),
            breed: "Labrador".into(),
            microchip_id: "CHIP-001".into(),
            owner_name: "Alex".into(),
            owner_phone: "555-0100".into(),
            ..PetData::default()
        },
        &owner_key,
    );
    println!("   pet_id: {}", pet_id);

    let record_id = service
        .add_vet_record(
            &pet_id,
            VetRecordData {
                record_type: "vaccination".into(),
                vet_name: "Dr. Patel".into(),
                procedure: "rabies booster".into(),
                ..VetRecordData::default()
            },
            &owner_key,
        )
        .ok_or("vet record rejected")?;
    println!("   vet record: {}", record_id);

    println!("⛏️  Mining block...");
    let (block, stats) = service.mine_next_block();
    println!(
        "   block {} mined: nonce {}, {} attempts, {}ms",
        block.block_number, block.nonce, stats.attempts, stats.time_ms
    );

    service.view_profile(&pet_id, "curious_viewer");
    service.report_lost(&pet_id, &owner_key, "Central Park", "red collar");
    println!("🚨 Rex reported lost");
    service.report_found(&pet_id, "good_samaritan", "555-0199");
    println!("✅ Rex reported found");

    let (block, _) = service.mine_next_block();
    println!("⛏️  Block {} mined with lifecycle events", block.block_number);

    println!("\n📜 History for {}:", pet_id);
    for entry in service.history(&pet_id) {
        println!("   {}", serde_json::to_string(&entry)?);
    }

    let stats = service.registry_stats();
    println!("\n📊 Registry: {}", serde_json::to_string(&stats)?);
    let stats = service.chain_stats();
    println!("📊 Chain:    {}", serde_json::to_string(&stats)?);

    service.validate_chain()?;
    println!("🔗 Chain valid ({} blocks)", service.blocks().len());

    Ok(())
}

/// Mine empty-pool blocks and report throughput.
pub fn run_mine(difficulty: usize, count: u32) -> CliResult<()> {
    let mut service = PetService::with_difficulty(difficulty);

    for _ in 0..count {
        let (block, stats) = service.mine_next_block();
        println!(
            "Block {}: nonce {} in {}ms ({:.2} H/s)",
            block.block_number, block.nonce, stats.time_ms, stats.hash_rate
        );
    }

    service.validate_chain()?;
    println!("Chain valid at height {}", service.blocks().len());
    Ok(())
}

/// Generate an owner key pair for registration and signing.
pub fn run_keygen() -> CliResult<()> {
    let key_pair = KeyPair::generate();
    println!("public key:  {}", key_pair.public_key_hex());
    println!("private key: {}", key_pair.private_key_hex());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_runs_clean() {
        run_demo(1).unwrap();
    }

    #[test]
    fn test_mine_command() {
        run_mine(1, 2).unwrap();
    }

    #[test]
    fn test_keygen() {
        run_keygen().unwrap();
    }
}
