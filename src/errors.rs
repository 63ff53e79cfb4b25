use thiserror::Error;

/// All errors that can occur in SecretVault.
///
/// No variant ever carries plaintext, ciphertext or key material.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Client errors ---
    #[error("Invalid base64 encoding: {0}")]
    InvalidEncoding(String),

    #[error("Secret not found")]
    NotFound,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailure(String),

    #[error("Decryption failed — stored secret is unreadable")]
    DecryptionFailure,

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    StorageFailure(String),

    // --- Runtime errors ---
    #[error("Internal error: {0}")]
    Internal(String),

    // --- Config errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// `true` when the caller's input caused the failure.
    ///
    /// Everything else is an internal error and must be reported to the
    /// caller without detail.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_) | Self::NotFound)
    }
}

impl From<rusqlite::Error> for VaultError {
    fn from(e: rusqlite::Error) -> Self {
        Self::StorageFailure(e.to_string())
    }
}

/// Convenience type alias for SecretVault results.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_classified() {
        assert!(VaultError::InvalidEncoding("bad".into()).is_client_error());
        assert!(VaultError::NotFound.is_client_error());
        assert!(!VaultError::DecryptionFailure.is_client_error());
        assert!(!VaultError::StorageFailure("down".into()).is_client_error());
        assert!(!VaultError::EncryptionFailure("x".into()).is_client_error());
    }

    #[test]
    fn not_found_message_has_no_detail() {
        assert_eq!(VaultError::NotFound.to_string(), "Secret not found");
    }
}
