//! Integration tests for the crypto module.

use secretvault::crypto::keys::VaultKey;
use secretvault::crypto::{decrypt, encrypt, KeyProvider};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = VaultKey::generate();
    let plaintext = br#"{"DATABASE_URL":"postgres://localhost/mydb"}"#;

    let ciphertext = encrypt(key.as_bytes(), plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = decrypt(key.as_bytes(), &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = VaultKey::generate();
    let plaintext = b"{}";

    let ct1 = encrypt(key.as_bytes(), plaintext).expect("encrypt 1");
    let ct2 = encrypt(key.as_bytes(), plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(
        ct1, ct2,
        "two encryptions of the same plaintext must differ"
    );

    // Both still decrypt to the same plaintext.
    assert_eq!(decrypt(key.as_bytes(), &ct1).unwrap(), plaintext);
    assert_eq!(decrypt(key.as_bytes(), &ct2).unwrap(), plaintext);
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = VaultKey::generate();
    let other = VaultKey::generate();

    let ciphertext = encrypt(key.as_bytes(), b"secret payload").unwrap();
    assert!(decrypt(other.as_bytes(), &ciphertext).is_err());
}

#[test]
fn decrypt_rejects_truncated_blob() {
    let key = VaultKey::generate();

    // Shorter than a nonce.
    assert!(decrypt(key.as_bytes(), &[0u8; 5]).is_err());

    // Nonce present but tag truncated.
    let ciphertext = encrypt(key.as_bytes(), b"payload").unwrap();
    assert!(decrypt(key.as_bytes(), &ciphertext[..ciphertext.len() - 1]).is_err());
}

#[test]
fn encrypt_rejects_wrong_key_length() {
    assert!(encrypt(b"too-short", b"payload").is_err());
}

// ---------------------------------------------------------------------------
// Key provider idempotence
// ---------------------------------------------------------------------------

#[test]
fn key_provider_returns_stable_key() {
    let dir = TempDir::new().unwrap();
    let provider = KeyProvider::new(
        dir.path().join(".vault.key"),
        dir.path().join(".secrets.vault"),
        dir.path().to_path_buf(),
    );

    let first = provider.get_or_create_key().expect("first call creates");
    let second = provider.get_or_create_key().expect("second call reads");
    assert_eq!(first.as_bytes(), second.as_bytes());

    // Data encrypted under the first copy decrypts under the second.
    let ciphertext = encrypt(first.as_bytes(), b"payload").unwrap();
    assert_eq!(decrypt(second.as_bytes(), &ciphertext).unwrap(), b"payload");
}
