//! Base64 codec for secret payloads.
//!
//! Plaintext and ciphertext both travel as standard-alphabet base64 with
//! canonical padding.  Validation is pure and runs before any crypto work.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::{Result, VaultError};

/// Check that `text` is canonical standard base64.
pub fn validate(text: &str) -> Result<()> {
    decode(text).map(|_| ())
}

/// Decode canonical standard base64 into raw bytes.
///
/// The error carries the decoder's diagnostic (offset and reason).
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| VaultError::InvalidEncoding(e.to_string()))
}

/// Encode raw bytes as canonical standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
