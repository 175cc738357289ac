//! Failure classes that decide the process exit code
//!
//! Everything else travels as plain `anyhow::Error` with context. These are
//! the cases the operator needs to tell apart, and the ones whose exit code
//! is not simply `1`.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when a program cannot be found or started.
pub const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("environment file not found: {}", path.display())]
    MissingEnvFile { path: PathBuf },

    #[error("`{command}` {}", describe_status(*code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("required tool `{tool}` not found on PATH")]
    MissingTool { tool: String },

    #[error(
        "{} exists but is not a complete checkout; remove it and re-run to clone it fresh",
        path.display()
    )]
    CorruptCheckout { path: PathBuf },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl BootstrapError {
    /// Process exit code for this failure.
    ///
    /// A failed external command hands its own code back unchanged; a
    /// signal-terminated command has none and maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            Self::Spawn { .. } | Self::MissingTool { .. } => EXIT_NOT_FOUND,
            Self::MissingEnvFile { .. } | Self::CorruptCheckout { .. } | Self::Config { .. } => 1,
        }
    }
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Exit code for any error surfaced from a run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<BootstrapError>())
        .map_or(1, BootstrapError::exit_code)
}
