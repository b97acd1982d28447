use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.secretvault.toml`.
///
/// Every field has a sensible default so the vault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Filename of the key artifact (relative to the project root).
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Filename of the encrypted vault (relative to the project root).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_file() -> String {
    ".vault.key".to_string()
}

fn default_vault_file() -> String {
    ".secrets.vault".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            vault_file: default_vault_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".secretvault.toml";

    /// Load settings from `<project_dir>/.secretvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the key artifact under `project_dir`.
    pub fn key_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.key_file)
    }

    /// Full path to the vault file under `project_dir`.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.key_file, ".vault.key");
        assert_eq!(s.vault_file, ".secrets.vault");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_file, ".vault.key");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
key_file = "master.key"
vault_file = "credentials.enc"
"#;
        fs::write(tmp.path().join(".secretvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_file, "master.key");
        assert_eq!(settings.vault_file, "credentials.enc");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let config = "key_file = \"master.key\"\n";
        fs::write(tmp.path().join(".secretvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_file, "master.key");
        // Rest should be defaults
        assert_eq!(settings.vault_file, ".secrets.vault");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".secretvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn artifact_paths_are_rooted_at_project_dir() {
        let s = Settings::default();
        let project = Path::new("/home/user/myproject");
        assert_eq!(
            s.key_path(project),
            PathBuf::from("/home/user/myproject/.vault.key")
        );
        assert_eq!(
            s.vault_path(project),
            PathBuf::from("/home/user/myproject/.secrets.vault")
        );
    }
}
