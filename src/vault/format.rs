//! Vault payload serialization and atomic file replacement.
//!
//! The decrypted payload is a single JSON object mapping secret names to
//! values. A `BTreeMap` keeps the serialized form deterministic for a given
//! mapping (the ciphertext still differs per save thanks to the nonce).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::{Result, VaultError};

/// Serialize the secret mapping to its plaintext JSON byte form.
pub fn encode_secrets(secrets: &BTreeMap<String, String>) -> Result<Vec<u8>> {
    serde_json::to_vec(secrets).map_err(|e| VaultError::Serialization(format!("secrets: {e}")))
}

/// Parse decrypted payload bytes back into the secret mapping.
pub fn decode_secrets(plaintext: &[u8]) -> Result<BTreeMap<String, String>> {
    serde_json::from_slice(plaintext)
        .map_err(|e| VaultError::InvalidPayload(format!("secrets JSON: {e}")))
}

/// Replace the file at `path` with `bytes` **atomically**.
///
/// Writes to a temp file in the same directory and renames it over the
/// target, so a reader never sees a half-written vault. The rename is
/// atomic because temp file and target share a filesystem.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
