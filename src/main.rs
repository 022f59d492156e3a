//! Pawchain CLI
//!
//! Command-line interface for the pet-identity ledger.

use clap::{Parser, Subcommand};
use pawchain::cli;
use pawchain::mining::MINING_DIFFICULTY;

#[derive(Parser)]
#[command(name = "pawchain")]
#[command(version = "0.1.0")]
#[command(about = "Pet identity registry on an append-only proof-of-work ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full in-memory walkthrough: register, mine, lose, find
    Demo {
        /// Number of leading '0' hex chars a block hash must carry
        #[arg(short, long, default_value_t = MINING_DIFFICULTY)]
        difficulty: usize,
    },

    /// Mine empty blocks and report hash throughput
    Mine {
        #[arg(short, long, default_value_t = MINING_DIFFICULTY)]
        difficulty: usize,

        /// Number of blocks to mine
        #[arg(short, long, default_value = "1")]
        count: u32,
    },

    /// Generate an owner key pair
    Keygen,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Demo { difficulty } => cli::run_demo(difficulty),
        Commands::Mine { difficulty, count } => cli::run_mine(difficulty, count),
        Commands::Keygen => cli::run_keygen(),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
