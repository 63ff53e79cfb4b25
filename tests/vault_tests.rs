//! Integration tests for the SecretVault vault service and store.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rusqlite::{params, Connection};
use secretvault::codec;
use secretvault::crypto::{Cipher, VaultKey, KEY_LEN};
use secretvault::vault::{SecretId, SecretStore, SqliteStore, VaultService};
use secretvault::VaultError;
use tempfile::TempDir;

/// Helper: a service over a fresh database file inside a temp dir.
fn file_service() -> (TempDir, std::path::PathBuf, VaultService) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("vault.db");
    let store = SqliteStore::open(&path).expect("open store");
    let service = VaultService::new(Cipher::new(VaultKey::new([0x33u8; KEY_LEN])), store);
    (dir, path, service)
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn fetch_returns_what_create_stored() {
    let (_dir, _path, service) = file_service();

    for payload in ["", "YQ==", "aGVsbG8gd29ybGQ=", codec::encode(&[0u8; 1024]).as_str()] {
        let id = service.create(payload).expect("create");
        assert_eq!(service.fetch(&id.to_string()).unwrap(), payload);
    }
}

#[test]
fn secrets_survive_reopening_the_store() {
    let (_dir, path, service) = file_service();
    let id = service.create("cGVyc2lzdGVk").unwrap();
    drop(service);

    let store = SqliteStore::open(&path).unwrap();
    let reopened = VaultService::new(Cipher::new(VaultKey::new([0x33u8; KEY_LEN])), store);
    assert_eq!(reopened.fetch(&id.to_string()).unwrap(), "cGVyc2lzdGVk");
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[test]
fn same_plaintext_twice_yields_two_records() {
    let (_dir, _path, service) = file_service();

    let a = service.create("dHdpbnM=").unwrap();
    let b = service.create("dHdpbnM=").unwrap();

    assert_ne!(a, b);
    assert_eq!(service.fetch(&a.to_string()).unwrap(), "dHdpbnM=");
    assert_eq!(service.fetch(&b.to_string()).unwrap(), "dHdpbnM=");
    assert_ne!(
        service.store().get(&a).unwrap(),
        service.store().get(&b).unwrap()
    );
}

#[test]
fn any_textual_form_of_the_id_fetches_the_record() {
    let (_dir, _path, service) = file_service();
    let id = service.create("Zm9ybXM=").unwrap();
    let canonical = id.to_string();

    for form in [
        canonical.clone(),
        canonical.to_uppercase(),
        canonical.replace('-', ""),
        format!("{{{canonical}}}"),
        format!("urn:uuid:{canonical}"),
    ] {
        assert_eq!(service.fetch(&form).unwrap(), "Zm9ybXM=", "form {form}");
    }
}

#[test]
fn prefix_of_an_id_does_not_match() {
    let (_dir, _path, service) = file_service();
    let id = service.create("cHJlZml4").unwrap();
    let prefix = &id.to_string()[..8];

    assert!(matches!(service.fetch(prefix), Err(VaultError::NotFound)));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn invalid_encoding_is_rejected_and_nothing_is_written() {
    let (_dir, _path, service) = file_service();

    let err = service.create("not-valid-base64!!").unwrap_err();
    assert!(matches!(err, VaultError::InvalidEncoding(_)));
    assert!(err.is_client_error());
    assert_eq!(service.store().count().unwrap(), 0);
}

#[test]
fn unknown_ids_are_not_found() {
    let (_dir, _path, service) = file_service();

    for id in ["nonexistent-id", SecretId::generate().to_string().as_str()] {
        let err = service.fetch(id).unwrap_err();
        assert!(matches!(err, VaultError::NotFound));
        assert!(err.is_client_error());
    }
}

#[test]
fn tampered_ciphertext_is_a_decryption_failure() {
    let (_dir, path, service) = file_service();
    let id = service.create("dGFtcGVy").unwrap();

    // Flip one bit of the stored envelope behind the service's back.
    let conn = Connection::open(&path).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT ciphertext FROM secrets WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    let mut envelope = codec::decode(&stored).unwrap();
    let last = envelope.len() - 1;
    envelope[last] ^= 0x01;
    conn.execute(
        "UPDATE secrets SET ciphertext = ?1 WHERE id = ?2",
        params![codec::encode(&envelope), id.to_string()],
    )
    .unwrap();

    let err = service.fetch(&id.to_string()).unwrap_err();
    assert!(matches!(err, VaultError::DecryptionFailure));
    assert!(!err.is_client_error());
}

#[test]
fn records_from_another_key_are_unreadable() {
    let (_dir, path, service) = file_service();
    let id = service.create("a2V5").unwrap();
    drop(service);

    let other = VaultService::new(
        Cipher::new(VaultKey::new([0x44u8; KEY_LEN])),
        SqliteStore::open(&path).unwrap(),
    );
    assert!(matches!(
        other.fetch(&id.to_string()),
        Err(VaultError::DecryptionFailure)
    ));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_creates_get_distinct_fetchable_ids() {
    let (_dir, _path, service) = file_service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let payload = codec::encode(format!("payload-{i}").as_bytes());
                let id = service.create(&payload).expect("create");
                (id, payload)
            })
        })
        .collect();

    let created: Vec<(SecretId, String)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    let ids: HashSet<SecretId> = created.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids.len(), 16);

    for (id, payload) in &created {
        assert_eq!(&service.fetch_by_id(id).unwrap(), payload);
    }
}
