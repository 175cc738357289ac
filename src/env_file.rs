//! Copying the runtime `.env` into the dependency checkout

use crate::error::BootstrapError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Copy `source` over `destination` byte for byte. Returns bytes copied.
///
/// The destination's parent directory must already exist.
pub fn materialize(source: &Path, destination: &Path) -> Result<u64> {
    ensure_source(source)?;

    let bytes = fs::copy(source, destination).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })?;
    tracing::debug!("copied {} bytes to {}", bytes, destination.display());
    Ok(bytes)
}

/// Fail with [`BootstrapError::MissingEnvFile`] unless `source` is a file.
pub fn ensure_source(source: &Path) -> Result<()> {
    if !source.is_file() {
        return Err(BootstrapError::MissingEnvFile {
            path: source.to_path_buf(),
        }
        .into());
    }
    Ok(())
}
