//! The process-wide vault key.
//!
//! A single 256-bit AES key, supplied as base64 text through configuration
//! and held in memory for the lifetime of the process.

use std::fmt;

use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::codec;
use crate::errors::{Result, VaultError};

/// Length of the vault key (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A wrapper around the 32-byte vault key that automatically zeroes
/// its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Create a new `VaultKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        let key = Self::new(bytes);
        bytes.zeroize();
        key
    }

    /// Parse a key from its base64 text form.
    ///
    /// Error messages never echo the supplied text.
    pub fn from_base64(text: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            codec::decode(text.trim())
                .map_err(|_| VaultError::Config("vault key is not valid base64".into()))?,
        );

        let bytes: [u8; KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
            VaultError::Config(format!(
                "vault key must decode to {KEY_LEN} bytes, got {}",
                decoded.len()
            ))
        })?;

        Ok(Self::new(bytes))
    }

    /// Encode the key as base64 text (used by `keygen`).
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(codec::encode(&self.bytes))
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey(<redacted>)")
    }
}
