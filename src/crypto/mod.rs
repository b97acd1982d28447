//! Cryptographic primitives for the secret vault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The zeroizing key wrapper (`keys`)
//! - The key provider managing the on-disk key artifact (`keyfile`)

pub mod encryption;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items.
pub use encryption::{decrypt, encrypt};
pub use keyfile::KeyProvider;
pub use keys::VaultKey;
