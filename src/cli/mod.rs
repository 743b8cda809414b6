//! CLI module for the org hierarchy service

pub mod serve;

use clap::{Parser, Subcommand};

/// Org Hierarchy Service - user accounts, team tree and team membership
#[derive(Parser)]
#[command(name = "org-hierarchy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
