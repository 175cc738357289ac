//! External command execution
//!
//! Every git and compose call goes through [`CommandRunner`]. An
//! [`Invocation`] carries its own working directory, so nothing here ever
//! changes the process-wide current directory.

use crate::error::BootstrapError;
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One external command: program, arguments and the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// How an external command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an invocation to completion and reports how it exited
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandStatus>;
}

/// Spawns real processes with inherited stdio and blocks until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandStatus> {
        tracing::debug!(cwd = %invocation.cwd.display(), "spawning {}", invocation);

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|source| BootstrapError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        tracing::debug!("{} finished with {:?}", invocation.program, status.code());
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// Prints what would run and reports success without spawning anything
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandStatus> {
        println!("   (dry run, in {})", invocation.cwd.display());
        Ok(CommandStatus::from_code(0))
    }
}

/// Echo and run an invocation; any non-zero exit becomes
/// [`BootstrapError::CommandFailed`].
pub fn run_checked<R: CommandRunner + ?Sized>(runner: &R, invocation: &Invocation) -> Result<()> {
    println!("Running: {}", invocation);

    let status = runner.run(invocation)?;
    if !status.success() {
        return Err(BootstrapError::CommandFailed {
            command: invocation.to_string(),
            code: status.code,
        }
        .into());
    }
    Ok(())
}
