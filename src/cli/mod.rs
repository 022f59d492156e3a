//! Command handlers for the `pawchain` binary

pub mod commands;

pub use commands::{run_demo, run_keygen, run_mine, CliResult};
