//! High-level vault operations.
//!
//! `VaultStore` wires the key provider, the payload format, and the crypto
//! layer together so that callers can work with simple method calls like
//! `store.set_secret("DB_URL", "postgres://...")`.
//!
//! There is no in-memory cache: every operation is a self-contained
//! load(-mutate-save) round trip, and the vault file on disk is the sole
//! source of truth between calls. Mutating operations hold an internal
//! mutex across their load-mutate-save sequence, which makes concurrent
//! use safe within a single process. Concurrent mutation from *separate*
//! processes can still lose updates (last save wins) — multi-process
//! coordination is a documented non-goal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;
use zeroize::Zeroize;

use crate::config::Settings;
use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::keyfile::KeyProvider;
use crate::errors::{Result, VaultError};

use super::format;

/// Result of reading the vault file.
///
/// The read path fails open: a vault that cannot be read decodes to an
/// empty mapping rather than an error, because callers must already handle
/// "secret absent" as a normal case. `degraded` keeps the two situations
/// distinguishable — `None` means the empty (or populated) mapping really
/// is the vault's content, `Some(e)` means the vault was unreadable and
/// the mapping was defaulted to empty.
pub struct LoadOutcome {
    /// The secret mapping, possibly defaulted to empty.
    pub secrets: BTreeMap<String, String>,

    /// The failure that forced the empty default, if any.
    pub degraded: Option<VaultError>,
}

impl LoadOutcome {
    /// Returns `true` if the vault file was unreadable and the mapping was
    /// defaulted to empty.
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// The main vault handle.
///
/// Construct one with explicit artifact paths ([`VaultStore::new`]) or from
/// project [`Settings`] ([`VaultStore::with_settings`]).
pub struct VaultStore {
    /// Path to the encrypted vault file on disk.
    path: PathBuf,

    /// Provider of the symmetric key (creates the key file on first use).
    keys: KeyProvider,

    /// Serializes load-mutate-save sequences within this process.
    write_guard: Mutex<()>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a store over the given key file and vault file paths.
    ///
    /// Neither file needs to exist yet: the key is generated on first use
    /// and an absent vault file reads as an empty mapping. `project_dir`
    /// is where the `.gitignore` entries for both artifacts are recorded.
    pub fn new(key_path: PathBuf, vault_path: PathBuf, project_dir: PathBuf) -> Self {
        let keys = KeyProvider::new(key_path, vault_path.clone(), project_dir);
        Self {
            path: vault_path,
            keys,
            write_guard: Mutex::new(()),
        }
    }

    /// Create a store with artifact paths taken from `settings`, rooted at
    /// `project_dir`.
    pub fn with_settings(project_dir: &Path, settings: &Settings) -> Self {
        Self::new(
            settings.key_path(project_dir),
            settings.vault_path(project_dir),
            project_dir.to_path_buf(),
        )
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Load / save primitives
    // ------------------------------------------------------------------

    /// Decrypt and return the secret mapping, failing open.
    ///
    /// Any failure — unreadable key, truncated or tampered ciphertext,
    /// malformed payload — yields an empty mapping and a `warn!`
    /// diagnostic. Use [`load_outcome`](Self::load_outcome) when the
    /// caller needs to observe the degradation.
    pub fn load(&self) -> BTreeMap<String, String> {
        self.load_outcome().secrets
    }

    /// Like [`load`](Self::load), but keeps the failure visible.
    pub fn load_outcome(&self) -> LoadOutcome {
        match self.try_load() {
            Ok(secrets) => LoadOutcome {
                secrets,
                degraded: None,
            },
            Err(e) => {
                warn!(
                    vault = %self.path.display(),
                    error = %e,
                    "vault unreadable — treating as empty",
                );
                LoadOutcome {
                    secrets: BTreeMap::new(),
                    degraded: Some(e),
                }
            }
        }
    }

    /// Encrypt `secrets` and replace the vault file's entire contents.
    ///
    /// Unlike the read path this fails closed: an error writing the key
    /// file or the vault file propagates, since pretending the save
    /// succeeded would silently lose data.
    ///
    /// Takes the same write guard as the CRUD operations, so a save never
    /// lands in the middle of another mutation's load-mutate-save
    /// sequence. Note that a caller composing its own load → mutate →
    /// `save` performs the load *outside* this guard; such a sequence must
    /// be serialized externally if other writers are active, or the later
    /// save wins and earlier mutations are lost.
    pub fn save(&self, secrets: &BTreeMap<String, String>) -> Result<()> {
        let _guard = self.lock_writes();
        self.persist(secrets)
    }

    /// The write path behind `save`; callers must hold the write guard.
    fn persist(&self, secrets: &BTreeMap<String, String>) -> Result<()> {
        let key = self.keys.get_or_create_key()?;

        let mut plaintext = format::encode_secrets(secrets)?;
        let blob = encrypt(key.as_bytes(), &plaintext);
        plaintext.zeroize();

        format::write_atomic(&self.path, &blob?)
    }

    /// The fallible read path behind `load`.
    fn try_load(&self) -> Result<BTreeMap<String, String>> {
        // An absent vault file is the normal state before the first save.
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let blob = fs::read(&self.path)?;
        if blob.is_empty() {
            return Err(VaultError::InvalidPayload("vault file is empty".into()));
        }

        let key = self.keys.get_or_create_key()?;
        let mut plaintext = decrypt(key.as_bytes(), &blob)?;

        let secrets = format::decode_secrets(&plaintext);
        plaintext.zeroize();
        secrets
    }

    // ------------------------------------------------------------------
    // Derived operations
    // ------------------------------------------------------------------

    /// Insert or overwrite a secret and persist the vault.
    pub fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        let _guard = self.lock_writes();

        let mut secrets = self.load();
        secrets.insert(name.to_string(), value.to_string());
        self.persist(&secrets)
    }

    /// Return the value stored under `name`, if any.
    pub fn get_secret(&self, name: &str) -> Option<String> {
        let mut secrets = self.load();
        secrets.remove(name)
    }

    /// Return the value stored under `name`, or `default` if absent.
    pub fn get_secret_or(&self, name: &str, default: &str) -> String {
        self.get_secret(name)
            .unwrap_or_else(|| default.to_string())
    }

    /// List all secret names, in sorted order.
    pub fn list_secret_keys(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    /// Remove a secret and persist the vault.
    ///
    /// Deleting a name that is not present is a no-op: no error, and no
    /// write to the vault file.
    pub fn delete_secret(&self, name: &str) -> Result<()> {
        let _guard = self.lock_writes();

        let mut secrets = self.load();
        if secrets.remove(name).is_none() {
            return Ok(());
        }
        self.persist(&secrets)
    }

    /// Acquire the load-mutate-save guard, recovering from poisoning.
    ///
    /// A panic while holding the lock cannot leave the vault file itself
    /// half-written (saves are atomic renames), so the poisoned state
    /// carries no meaning for us.
    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
