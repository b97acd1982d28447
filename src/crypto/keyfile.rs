//! Key provider — owns the lifecycle of the on-disk key artifact.
//!
//! The key file holds the raw symmetric key bytes, no wrapping format.
//! It is created lazily the first time a key is requested, persisted with
//! owner-only permissions, and read back verbatim on every later request.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, VaultError};
use crate::gitignore;

use super::keys::VaultKey;

/// Provides the vault's symmetric key, creating it on first use.
///
/// Holds the vault file path as well: generating a fresh key while an
/// encrypted vault already exists would strand that vault forever, so the
/// provider checks for this before it ever generates.
pub struct KeyProvider {
    /// Where the raw key bytes live on disk.
    key_path: PathBuf,

    /// The vault file guarded by this key (orphan check + ignore entry).
    vault_path: PathBuf,

    /// Directory whose `.gitignore` receives the artifact filenames.
    project_dir: PathBuf,
}

impl KeyProvider {
    pub fn new(key_path: PathBuf, vault_path: PathBuf, project_dir: PathBuf) -> Self {
        Self {
            key_path,
            vault_path,
            project_dir,
        }
    }

    /// Returns the path to the key file.
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Return the persisted key, generating and persisting one if absent.
    ///
    /// An existing key file is returned verbatim — no length or format
    /// validation here; a bad key is rejected by the cipher when used.
    ///
    /// If the key file is missing but the vault file exists, the vault was
    /// encrypted under a key we no longer have. Generating a replacement
    /// would make its contents permanently undecryptable, so this is an
    /// error instead.
    pub fn get_or_create_key(&self) -> Result<VaultKey> {
        if self.key_path.exists() {
            let bytes = fs::read(&self.key_path).map_err(|e| {
                VaultError::Keyfile(format!(
                    "failed to read key file {}: {e}",
                    self.key_path.display()
                ))
            })?;
            return Ok(VaultKey::new(bytes));
        }

        if self.vault_path.exists() {
            return Err(VaultError::OrphanedVault(self.vault_path.clone()));
        }

        let key = VaultKey::generate();

        if let Some(parent) = self.key_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VaultError::Keyfile(format!("cannot create key file directory: {e}"))
                })?;
            }
        }

        fs::write(&self.key_path, key.as_bytes())
            .map_err(|e| VaultError::Keyfile(format!("failed to write key file: {e}")))?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.key_path, perms).map_err(|e| {
                VaultError::Keyfile(format!("failed to set key file permissions: {e}"))
            })?;
        }

        debug!(path = %self.key_path.display(), "generated new vault key");

        // Keep both artifacts out of version control. Best-effort.
        for artifact in [&self.key_path, &self.vault_path] {
            if let Some(name) = artifact.file_name().and_then(|n| n.to_str()) {
                gitignore::register_ignored(&self.project_dir, name);
            }
        }

        Ok(key)
    }
}
