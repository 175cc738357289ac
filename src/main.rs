use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use compose_bootstrap::git::CheckoutAction;
use compose_bootstrap::{
    error, logging, preflight, Bootstrap, BootstrapConfig, DryRunRunner, Profile, RunOptions,
    SystemRunner,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Start the local AI and Supabase services", long_about = None)]
struct Cli {
    /// Profile to use for Docker Compose
    #[arg(long, value_enum, default_value_t = Profile::Cpu)]
    profile: Profile,

    /// Project root holding the compose file and .env (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (default: <root>/bootstrap.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pull latest images before starting
    #[arg(long)]
    pull: bool,

    /// Print the commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "❌ Error:".red().bold(), err);
        std::process::exit(error::exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let config = BootstrapConfig::load(&root, cli.config.as_deref())?;
    let layout = config.layout(&root)?;

    let options = RunOptions {
        profile: cli.profile,
        pull: cli.pull,
    };

    let report = if cli.dry_run {
        println!("🔍 Dry run: commands are printed, not executed\n");
        Bootstrap::new(&DryRunRunner, &config, layout)
            .dry_run(true)
            .run(options)?
    } else {
        preflight::ensure_tools(&config)?;
        Bootstrap::new(&SystemRunner, &config, layout).run(options)?
    };

    let checkout = match report.checkout {
        CheckoutAction::Cloned => "cloned",
        CheckoutAction::Updated => "updated",
    };
    if cli.dry_run {
        println!("\n{} dry run complete for profile '{}'", "✓".green(), report.profile);
    } else {
        println!(
            "\n{} services started with profile '{}' (dependency {})",
            "✓".green(),
            report.profile,
            checkout
        );
    }
    Ok(())
}
