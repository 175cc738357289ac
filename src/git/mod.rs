//! Git handling for the dependency checkout
//!
//! Handles:
//! - Sparse, blob-filtered first clone
//! - Pulling an existing checkout
//! - Refusing to touch a directory that is not a complete checkout

mod operations;
mod validation;

pub use operations::{
    checkout, clone_without_checkout, pull, sparse_checkout_init, sparse_checkout_set,
};
pub use validation::{ensure_checkout_intact, has_git_metadata};

use crate::config::DependencyConfig;
use crate::runner::{run_checked, CommandRunner};
use anyhow::Result;
use std::path::Path;

/// What `ensure_dependency_checkout` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    Cloned,
    Updated,
}

/// Clone `dependency` into `dir` if it is absent, otherwise pull it.
///
/// An existing directory is only ever updated, never re-cloned.
pub fn ensure_dependency_checkout<R: CommandRunner + ?Sized>(
    runner: &R,
    git: &str,
    root: &Path,
    dir: &Path,
    dependency: &DependencyConfig,
) -> Result<CheckoutAction> {
    if dir.exists() {
        println!("📦 {} already exists, updating...", dir.display());
        ensure_checkout_intact(dir, &dependency.sparse_path)?;
        run_checked(runner, &pull(git, dir))?;
        return Ok(CheckoutAction::Updated);
    }

    println!("📦 Cloning {} (sparse: {})...", dependency.url, dependency.sparse_path);
    for invocation in [
        clone_without_checkout(git, root, &dependency.url, dir)?,
        sparse_checkout_init(git, dir),
        sparse_checkout_set(git, dir, &dependency.sparse_path),
        checkout(git, dir, &dependency.branch),
    ] {
        run_checked(runner, &invocation)?;
    }
    Ok(CheckoutAction::Cloned)
}
