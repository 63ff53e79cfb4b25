//! Cryptographic primitives for SecretVault.
//!
//! This module provides:
//! - AES-256-GCM envelope encryption and decryption (`encryption`)
//! - The zeroize-on-drop vault key (`keys`)
//! - The text-level cipher engine used by the vault service (`cipher`)

pub mod cipher;
pub mod encryption;
pub mod keys;

pub use cipher::Cipher;
pub use encryption::{decrypt, encrypt};
pub use keys::{VaultKey, KEY_LEN};
