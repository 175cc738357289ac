//! Preflight checks - ensure the external tools are installed before any
//! step runs.

use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use anyhow::Result;

/// Fail with [`BootstrapError::MissingTool`] for the first configured
/// program not found on `PATH`.
pub fn ensure_tools(config: &BootstrapConfig) -> Result<()> {
    for tool in [&config.git.program, &config.compose.program] {
        match which::which(tool) {
            Ok(path) => tracing::debug!("found {} at {}", tool, path.display()),
            Err(_) => {
                return Err(BootstrapError::MissingTool { tool: tool.clone() }.into());
            }
        }
    }
    Ok(())
}
