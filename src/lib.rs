//! A local, file-backed encrypted secret store.
//!
//! Secrets are kept as a single name → value mapping, serialized to JSON
//! and encrypted with AES-256-GCM under a key that lives in its own file
//! next to the vault. Every operation reads the vault file fresh and
//! mutating operations rewrite it whole, so the file on disk is always the
//! single source of truth.
//!
//! ```no_run
//! use secretvault::VaultStore;
//! use std::path::PathBuf;
//!
//! let store = VaultStore::new(
//!     PathBuf::from(".vault.key"),
//!     PathBuf::from(".secrets.vault"),
//!     PathBuf::from("."),
//! );
//!
//! store.set_secret("API_KEY", "abc123")?;
//! assert_eq!(store.get_secret("API_KEY").as_deref(), Some("abc123"));
//! # Ok::<(), secretvault::VaultError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod errors;
pub mod gitignore;
pub mod vault;

pub use config::Settings;
pub use errors::{Result, VaultError};
pub use vault::{LoadOutcome, VaultStore};
