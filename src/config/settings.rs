use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::crypto::VaultKey;
use crate::errors::{Result, VaultError};

/// Environment variable holding the base64 vault key.
pub const ENV_KEY: &str = "SECRETVAULT_KEY";

/// Environment variable holding the store connection string.
pub const ENV_DATABASE_URL: &str = "SECRETVAULT_DATABASE_URL";

/// Environment variable holding the HTTP listen address.
pub const ENV_BIND_ADDR: &str = "SECRETVAULT_BIND_ADDR";

/// Process configuration, loaded from `secretvault.toml` and the
/// environment.
///
/// The key and the database URL have no defaults: a process that cannot
/// find them must refuse to start.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Base64-encoded 32-byte vault key.
    #[serde(default)]
    pub key: Option<String>,

    /// Connection string of the secret store (SQLite path or URL).
    #[serde(default)]
    pub database_url: Option<String>,

    /// Address the HTTP server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key: None,
            database_url: None,
            bind_addr: default_bind_addr(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = "secretvault.toml";

    /// Load settings from `<dir>/secretvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    /// Load settings from an explicit file, which must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            VaultError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| VaultError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Resolve settings the way the binary does: explicit file if given,
    /// otherwise the default file in `cwd`, then environment overrides.
    pub fn resolve(config: Option<&Path>, cwd: &Path) -> Result<Self> {
        let settings = match config {
            Some(path) => Self::load_file(path)?,
            None => Self::load(cwd)?,
        };
        Ok(settings.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply overrides from `lookup` (normally the process environment).
    ///
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_KEY) {
            self.key = Some(key);
        }
        if let Some(url) = get(ENV_DATABASE_URL) {
            self.database_url = Some(url);
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }
        self
    }

    /// Parse the vault key, failing if it is absent or malformed.
    pub fn require_key(&self) -> Result<VaultKey> {
        let text = self.key.as_deref().ok_or_else(|| {
            VaultError::Config(format!(
                "no vault key configured — set {ENV_KEY} (generate one with `secretvault keygen`)"
            ))
        })?;
        VaultKey::from_base64(text)
    }

    /// Return the store connection string, failing if it is absent.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            VaultError::Config(format!(
                "no database URL configured — set {ENV_DATABASE_URL} or `database_url`"
            ))
        })
    }

    /// Default path of the settings file for a directory.
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(Self::FILE_NAME)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
