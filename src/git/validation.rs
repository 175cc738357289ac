//! Checkout integrity checks

use crate::error::BootstrapError;
use anyhow::Result;
use std::path::Path;

/// True when `dir` has git metadata (a `.git` directory, or a `.git` file
/// for worktrees and submodules).
pub fn has_git_metadata(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Refuse to update a directory that is not a complete sparse checkout.
///
/// Both `.git` and the checked-out `sparse_path` must be present; a clone
/// interrupted before its checkout step has the first but not the second.
/// Only the filesystem is inspected; no git command runs.
pub fn ensure_checkout_intact(dir: &Path, sparse_path: &str) -> Result<()> {
    if !has_git_metadata(dir) || !dir.join(sparse_path).is_dir() {
        return Err(BootstrapError::CorruptCheckout {
            path: dir.to_path_buf(),
        }
        .into());
    }
    Ok(())
}
