//! Shared `.gitignore` patching logic.
//!
//! The key provider calls this when it first creates the key file, so the
//! key and vault artifacts never end up tracked by version control.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// Append `entry` to `<project_dir>/.gitignore` if not already present.
///
/// Creates the file if it doesn't exist. Write errors are logged and
/// swallowed (non-fatal — the ignore entry is bookkeeping, not part of the
/// vault's correctness contract).
pub fn register_ignored(project_dir: &Path, entry: &str) {
    let gitignore_path = project_dir.join(".gitignore");

    let existing = fs::read_to_string(&gitignore_path).unwrap_or_default();

    if existing.lines().any(|line| line.trim() == entry) {
        return;
    }

    let separator = if existing.ends_with('\n') || existing.is_empty() {
        ""
    } else {
        "\n"
    };

    match fs::write(&gitignore_path, format!("{existing}{separator}{entry}\n")) {
        Ok(()) => debug!(entry, "added entry to .gitignore"),
        Err(e) => warn!(entry, error = %e, "could not update .gitignore"),
    }
}
