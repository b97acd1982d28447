use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in the secret vault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted vault file")]
    DecryptionFailed,

    // --- Key provider errors ---
    #[error("Key file error: {0}")]
    Keyfile(String),

    #[error(
        "vault file {0} exists but its key file is missing — \
         refusing to generate a new key that cannot decrypt it"
    )]
    OrphanedVault(PathBuf),

    // --- Vault payload errors ---
    #[error("Invalid vault payload: {0}")]
    InvalidPayload(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for vault results.
pub type Result<T> = std::result::Result<T, VaultError>;
