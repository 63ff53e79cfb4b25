//! The cipher engine: base64 plaintext in, base64 ciphertext out.
//!
//! Wraps the raw AEAD layer in `encryption` with the codec so callers only
//! ever handle text.  The key is immutable after construction, so a single
//! `Cipher` can be shared across threads.

use zeroize::Zeroizing;

use crate::codec;
use crate::errors::{Result, VaultError};

use super::encryption::{decrypt, encrypt};
use super::keys::VaultKey;

/// Encrypts and decrypts secret payloads under the vault key.
#[derive(Debug)]
pub struct Cipher {
    key: VaultKey,
}

impl Cipher {
    pub fn new(key: VaultKey) -> Self {
        Self { key }
    }

    /// Encrypt a base64 plaintext, returning the base64 envelope.
    ///
    /// The output differs on every call, even for identical input.
    pub fn encrypt(&self, plaintext_b64: &str) -> Result<String> {
        let plaintext = Zeroizing::new(codec::decode(plaintext_b64)?);
        let envelope = encrypt(self.key.as_bytes(), &plaintext)?;
        Ok(codec::encode(&envelope))
    }

    /// Decrypt a base64 envelope back to the base64 plaintext.
    ///
    /// A ciphertext that is not even base64 is reported as a decryption
    /// failure, never as an encoding error: it did not come from a client.
    pub fn decrypt(&self, ciphertext_b64: &str) -> Result<String> {
        let envelope = codec::decode(ciphertext_b64).map_err(|_| VaultError::DecryptionFailure)?;
        let plaintext = Zeroizing::new(decrypt(self.key.as_bytes(), &envelope)?);
        Ok(codec::encode(&plaintext))
    }
}
