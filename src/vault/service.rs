//! The vault service: the only externally observable behavior.
//!
//! Orchestrates codec → cipher → store for `create`, and the reverse for
//! `fetch`.  The cipher and the store are injected at construction; the
//! service itself holds no mutable state and can be shared freely.

use tracing::{error, info, warn};

use crate::codec;
use crate::crypto::Cipher;
use crate::errors::{Result, VaultError};

use super::secret::SecretId;
use super::store::{SecretStore, SqliteStore};

/// Handle for creating and fetching secrets.
pub struct VaultService<S = SqliteStore> {
    cipher: Cipher,
    store: S,
}

impl<S: SecretStore> VaultService<S> {
    pub fn new(cipher: Cipher, store: S) -> Self {
        Self { cipher, store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encrypt and persist a base64 payload, returning its new identifier.
    ///
    /// Encoding is checked before any cryptographic or storage work, so
    /// an `InvalidEncoding` error guarantees nothing was written.
    pub fn create(&self, plaintext_b64: &str) -> Result<SecretId> {
        if let Err(e) = codec::validate(plaintext_b64) {
            warn!(error = %e, "rejected secret with invalid encoding");
            return Err(e);
        }

        let ciphertext = self.cipher.encrypt(plaintext_b64).inspect_err(|e| {
            error!(error = %e, "failed to encrypt secret");
        })?;

        let id = self.store.put(&ciphertext).inspect_err(|e| {
            error!(error = %e, "failed to persist secret");
        })?;

        info!(secret_id = %id, "secret created");
        Ok(id)
    }

    /// Fetch and decrypt a secret by the textual form of its identifier.
    ///
    /// Malformed and unknown identifiers both yield `NotFound`.
    pub fn fetch(&self, secret_id: &str) -> Result<String> {
        let id = SecretId::parse(secret_id).inspect_err(|_| {
            warn!("secret not found");
        })?;
        self.fetch_by_id(&id)
    }

    /// Fetch and decrypt a secret by its parsed identifier.
    pub fn fetch_by_id(&self, id: &SecretId) -> Result<String> {
        let ciphertext = match self.store.get(id) {
            Ok(ct) => ct,
            Err(VaultError::NotFound) => {
                warn!(secret_id = %id, "secret not found");
                return Err(VaultError::NotFound);
            }
            Err(e) => {
                error!(secret_id = %id, error = %e, "failed to read secret");
                return Err(e);
            }
        };

        let plaintext = self.cipher.decrypt(&ciphertext).inspect_err(|_| {
            error!(secret_id = %id, "stored secret could not be decrypted");
        })?;

        info!(secret_id = %id, "secret fetched");
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::VaultKey;

    fn service() -> VaultService {
        let cipher = Cipher::new(VaultKey::generate());
        VaultService::new(cipher, SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn create_then_fetch() {
        let svc = service();
        let id = svc.create("c2VjcmV0").unwrap();
        assert_eq!(svc.fetch(&id.to_string()).unwrap(), "c2VjcmV0");
    }

    #[test]
    fn invalid_payload_persists_nothing() {
        let svc = service();
        let err = svc.create("not-valid-base64!!").unwrap_err();
        assert!(matches!(err, VaultError::InvalidEncoding(_)));
        assert_eq!(svc.store().count().unwrap(), 0);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.fetch("nonexistent-id"),
            Err(VaultError::NotFound)
        ));
    }

    #[test]
    fn stored_value_is_not_the_plaintext() {
        let svc = service();
        let id = svc.create("c2VjcmV0").unwrap();
        let stored = svc.store().get(&id).unwrap();
        assert_ne!(stored, "c2VjcmV0");
    }
}
