//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - Payload serialization and atomic file replacement (`format`)
//! - The high-level `VaultStore` with load/save and the four CRUD
//!   operations (`store`)

pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use store::{LoadOutcome, VaultStore};
