//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::Path;

use clap::Parser;

use crate::config::Settings;
use crate::crypto::Cipher;
use crate::errors::Result;
use crate::vault::{SqliteStore, VaultService};

/// SecretVault CLI: minimal encrypted secret vault.
#[derive(Parser)]
#[command(
    name = "secretvault",
    about = "Minimal encrypted secret vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: ./secretvault.toml, if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Secret store connection string (SQLite path or sqlite:// URL)
    #[arg(long, env = "SECRETVAULT_DATABASE_URL", global = true)]
    pub database_url: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Listen address (default: 127.0.0.1:8000)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store a base64 secret and print its identifier
    Create {
        /// Base64 payload (omit to read from stdin)
        secret: Option<String>,
    },

    /// Print the base64 payload of a stored secret
    Fetch {
        /// Secret identifier
        secret_id: String,
    },

    /// Generate a new random vault key
    Keygen,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve settings from the config file, the environment and CLI flags,
/// in increasing order of precedence.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::resolve(cli.config.as_deref().map(Path::new), &cwd)?;

    if let Some(url) = cli.database_url.as_deref().filter(|u| !u.is_empty()) {
        settings.database_url = Some(url.to_string());
    }

    Ok(settings)
}

/// Build the vault service from settings.
///
/// Loads the key and opens the store once; both are required.
pub fn open_service(settings: &Settings) -> Result<VaultService> {
    let key = settings.require_key()?;
    let store = SqliteStore::connect(settings.require_database_url()?)?;
    Ok(VaultService::new(Cipher::new(key), store))
}
