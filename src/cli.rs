// src/cli.rs
// Command line interface

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ensa-portal", version, about = "ENSA website API server")]
pub struct Cli {
    /// Override the listening port (PORTAL_PORT otherwise)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Grant the admin role to an existing account
    Promote {
        /// Email the account registered with
        email: String,
    },
    /// Revoke the admin role from an account
    Demote {
        email: String,
    },
    /// Apply database migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
