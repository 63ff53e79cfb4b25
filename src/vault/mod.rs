//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - `SecretId` and `SecretRecord` types (`secret`)
//! - The `SecretStore` persistence boundary and its SQLite backend (`store`)
//! - The `VaultService` that ties codec, cipher and store together (`service`)

pub mod secret;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use secret::{SecretId, SecretRecord};
pub use service::VaultService;
pub use store::{SecretStore, SqliteStore};
