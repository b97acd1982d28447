//! The vault's symmetric key, held in zeroizing memory.

use rand::RngCore;
use zeroize::Zeroize;

/// Length of a freshly generated key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// The raw symmetric key, zeroed in memory when dropped.
///
/// The bytes are carried exactly as read from the key file — deliberately
/// unvalidated, since building the AES-256-GCM cipher rejects a key of the
/// wrong length at the moment it is actually used.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: Vec<u8>,
}

impl VaultKey {
    /// Wrap raw key bytes (e.g. the contents of the key file).
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Generate a fresh cryptographically random 32-byte key.
    ///
    /// Drawn from `rand::rng()`, a CSPRNG reseeded from the OS.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
