//! The bootstrap pipeline: fetch → prepare → stop → [pull] → start
//!
//! Each step blocks on its external command and the first failure ends the
//! run, so later steps never see a half-prepared environment.

use crate::compose::{self, ComposeAction};
use crate::config::{BootstrapConfig, Layout};
use crate::env_file;
use crate::git::{self, CheckoutAction};
use crate::profile::Profile;
use crate::runner::{run_checked, CommandRunner};
use anyhow::Result;

/// Per-invocation choices from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub profile: Profile,
    /// Pull images between stop and start
    pub pull: bool,
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub checkout: CheckoutAction,
    /// `None` on a dry run
    pub env_bytes: Option<u64>,
    pub profile: Profile,
}

pub struct Bootstrap<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    config: &'a BootstrapConfig,
    layout: Layout,
    dry_run: bool,
}

impl<'a, R: CommandRunner + ?Sized> Bootstrap<'a, R> {
    pub fn new(runner: &'a R, config: &'a BootstrapConfig, layout: Layout) -> Self {
        Self {
            runner,
            config,
            layout,
            dry_run: false,
        }
    }

    /// Skip filesystem writes; pair with a non-spawning runner
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&self, options: RunOptions) -> Result<RunReport> {
        tracing::info!(profile = %options.profile, pull = options.pull, "bootstrap starting");

        let checkout = self.ensure_dependency_checkout()?;
        let env_bytes = self.materialize_environment_file()?;
        self.stop_services(options.profile)?;
        if options.pull {
            self.pull_images(options.profile)?;
        }
        self.start_services(options.profile)?;

        Ok(RunReport {
            checkout,
            env_bytes,
            profile: options.profile,
        })
    }

    pub fn ensure_dependency_checkout(&self) -> Result<CheckoutAction> {
        git::ensure_dependency_checkout(
            self.runner,
            &self.config.git.program,
            &self.layout.root,
            &self.layout.checkout_dir,
            &self.config.dependency,
        )
    }

    pub fn materialize_environment_file(&self) -> Result<Option<u64>> {
        let Layout {
            env_source,
            env_destination,
            ..
        } = &self.layout;
        println!(
            "📄 Copying {} to {}...",
            env_source.display(),
            env_destination.display()
        );

        if self.dry_run {
            env_file::ensure_source(env_source)?;
            return Ok(None);
        }
        env_file::materialize(env_source, env_destination).map(Some)
    }

    pub fn stop_services(&self, profile: Profile) -> Result<()> {
        println!("🛑 Stopping and removing existing containers...");
        self.compose(profile, ComposeAction::Down)
    }

    pub fn pull_images(&self, profile: Profile) -> Result<()> {
        println!("⬇️  Pulling latest images...");
        self.compose(profile, ComposeAction::Pull)
    }

    pub fn start_services(&self, profile: Profile) -> Result<()> {
        println!("🚀 Starting all services...");
        self.compose(profile, ComposeAction::Up)
    }

    fn compose(&self, profile: Profile, action: ComposeAction) -> Result<()> {
        let invocation = compose::invocation(
            &self.config.compose.program,
            &self.layout.root,
            &self.layout.compose_file,
            profile,
            action,
        );
        run_checked(self.runner, &invocation)
    }
}
