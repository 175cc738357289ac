//! `docker compose` invocations scoped to a profile

use crate::profile::Profile;
use crate::runner::Invocation;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    /// Stop and remove the profile's containers
    Down,
    Pull,
    /// Start detached
    Up,
}

impl ComposeAction {
    fn args(&self) -> &'static [&'static str] {
        match self {
            ComposeAction::Down => &["down"],
            ComposeAction::Pull => &["pull"],
            ComposeAction::Up => &["up", "-d"],
        }
    }
}

/// `<program> compose -f <file> [--profile <p>] <action>`, run from `root`
pub fn invocation(
    program: &str,
    root: &Path,
    file: &str,
    profile: Profile,
    action: ComposeAction,
) -> Invocation {
    let mut inv = Invocation::new(program, root).args(["compose", "-f", file]);
    if let Some(filter) = profile.filter() {
        inv = inv.args(["--profile", filter]);
    }
    inv.args(action.args().iter().copied())
}
