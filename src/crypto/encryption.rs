//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! returned envelope carries a one-byte format version, which is also
//! bound into the tag as associated data so it cannot be swapped.
//!
//! Layout of the returned byte buffer:
//!   [ 1-byte version | 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{Result, VaultError};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Smallest envelope that can possibly be valid (empty plaintext).
pub const MIN_ENVELOPE_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `version || nonce || ciphertext`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailure(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let version = [ENVELOPE_VERSION];

    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: &version,
            },
        )
        .map_err(|e| VaultError::EncryptionFailure(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    output.push(ENVELOPE_VERSION);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt an envelope that was produced by `encrypt`.
///
/// Every failure (short input, unknown version, wrong key, bad tag)
/// collapses into `DecryptionFailure`.
pub fn decrypt(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>> {
    if envelope.len() < MIN_ENVELOPE_LEN {
        return Err(VaultError::DecryptionFailure);
    }

    let (version, rest) = envelope.split_at(1);
    if version[0] != ENVELOPE_VERSION {
        return Err(VaultError::DecryptionFailure);
    }

    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::DecryptionFailure)?;

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: version,
            },
        )
        .map_err(|_| VaultError::DecryptionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_starts_with_version() {
        let key = [0x42u8; 32];
        let envelope = encrypt(&key, b"abc").unwrap();
        assert_eq!(envelope[0], ENVELOPE_VERSION);
        assert_eq!(envelope.len(), MIN_ENVELOPE_LEN + 3);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = [0x42u8; 32];
        let envelope = encrypt(&key, b"").unwrap();
        assert_eq!(decrypt(&key, &envelope).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let key = [0x42u8; 32];
        let mut envelope = encrypt(&key, b"abc").unwrap();
        envelope[0] = 2;
        assert!(matches!(
            decrypt(&key, &envelope),
            Err(VaultError::DecryptionFailure)
        ));
    }

    #[test]
    fn invalid_key_length_fails_encrypt() {
        assert!(matches!(
            encrypt(&[0u8; 7], b"abc"),
            Err(VaultError::EncryptionFailure(_))
        ));
    }
}
