//! CLI module for the accounts API

pub mod serve;

use clap::{Parser, Subcommand};

/// User accounts API - signup with cookie-based token issuance
#[derive(Parser)]
#[command(name = "accounts-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
