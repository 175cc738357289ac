//! Low-level git invocations
//!
//! These only build argv; running them is the caller's job.

use crate::runner::Invocation;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Blob-filtered clone without a checkout, run from `parent`
///
/// `dir` becomes a git argument and must be valid UTF-8.
pub fn clone_without_checkout(
    git: &str,
    parent: &Path,
    url: &str,
    dir: &Path,
) -> Result<Invocation> {
    let target = dir
        .to_str()
        .ok_or_else(|| anyhow!("Checkout path is not valid UTF-8: {}", dir.display()))?;
    Ok(Invocation::new(git, parent)
        .args(["clone", "--filter=blob:none", "--no-checkout", url])
        .arg(target))
}

/// Switch the working copy to cone-mode sparse checkout
pub fn sparse_checkout_init(git: &str, repo: &Path) -> Invocation {
    Invocation::new(git, repo).args(["sparse-checkout", "init", "--cone"])
}

/// Restrict the working copy to `path`
pub fn sparse_checkout_set(git: &str, repo: &Path, path: &str) -> Invocation {
    Invocation::new(git, repo).args(["sparse-checkout", "set", path])
}

pub fn checkout(git: &str, repo: &Path, branch: &str) -> Invocation {
    Invocation::new(git, repo).args(["checkout", branch])
}

pub fn pull(git: &str, repo: &Path) -> Invocation {
    Invocation::new(git, repo).arg("pull")
}
