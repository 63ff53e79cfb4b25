//! Durable storage for encrypted secret records.
//!
//! `SecretStore` is the narrow persistence boundary the vault service
//! depends on: a write-only `put` that assigns a fresh identifier, and an
//! exact-match `get`.  `SqliteStore` implements it on top of a single
//! SQLite connection opened once at startup.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, warn};

use crate::errors::{Result, VaultError};

use super::secret::{SecretId, SecretRecord};

/// How many identifiers `put` will try before giving up on a collision.
const INSERT_ATTEMPTS: usize = 2;

/// Persistence boundary for ciphertext records.
///
/// Implementations must be safe to call from many threads at once and
/// must never overwrite an existing record.
pub trait SecretStore: Send + Sync {
    /// Persist `ciphertext` under a freshly generated identifier.
    fn put(&self, ciphertext: &str) -> Result<SecretId>;

    /// Look up the ciphertext stored under `id`.
    fn get(&self, id: &SecretId) -> Result<String>;
}

/// SQLite-backed secret store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store described by a connection string.
    ///
    /// Accepts a plain filesystem path, `sqlite://<path>`, `sqlite:<path>`
    /// or `:memory:`.
    pub fn connect(database_url: &str) -> Result<Self> {
        let target = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        if target.is_empty() {
            return Err(VaultError::Config("database URL is empty".into()));
        }

        if target == ":memory:" {
            return Self::open_in_memory();
        }

        Self::open(Path::new(target))
    }

    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self::init(Connection::open(path)?)?;

        // Set restrictive permissions on the database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        debug!(path = %path.display(), "opened secret database");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS secrets (
                id          TEXT PRIMARY KEY NOT NULL,
                ciphertext  TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM secrets", [], |row| row.get(0))?;
        usize::try_from(n).map_err(|e| VaultError::StorageFailure(format!("row count: {e}")))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::StorageFailure("database connection lock poisoned".into()))
    }

    /// Insert with identifiers drawn from `next_id`, retrying once on a
    /// primary-key collision.
    fn put_with(&self, ciphertext: &str, mut next_id: impl FnMut() -> SecretId) -> Result<SecretId> {
        let conn = self.lock()?;

        for attempt in 1..=INSERT_ATTEMPTS {
            let record = SecretRecord {
                id: next_id(),
                ciphertext: ciphertext.to_string(),
                created_at: Utc::now(),
            };

            match insert(&conn, &record) {
                Ok(()) => return Ok(record.id),
                Err(e) if is_collision(&e) => {
                    warn!(attempt, "secret identifier collision");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(VaultError::StorageFailure(
            "could not allocate a unique secret identifier".into(),
        ))
    }
}

impl SecretStore for SqliteStore {
    fn put(&self, ciphertext: &str) -> Result<SecretId> {
        self.put_with(ciphertext, SecretId::generate)
    }

    fn get(&self, id: &SecretId) -> Result<String> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT ciphertext FROM secrets WHERE id = ?1",
            params![id.as_key()],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(VaultError::NotFound)
    }
}

fn insert(conn: &Connection, record: &SecretRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO secrets (id, ciphertext, created_at) VALUES (?1, ?2, ?3)",
        params![
            record.id.as_key(),
            record.ciphertext,
            record.created_at.to_rfc3339()
        ],
    )?;
    Ok(())
}

fn is_collision(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}
