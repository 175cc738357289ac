//! Print where the bootstrapper runs from and which tools it can reach
//!
//! Run with: check-env [--json]

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use compose_bootstrap::{logging, BootstrapConfig, Environment};

#[derive(Parser)]
#[command(version, about = "Show the environment start-services will run in")]
struct Cli {
    /// Output results as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(false);

    let root = std::env::current_dir()?;
    let config = BootstrapConfig::load(&root, None).unwrap_or_else(|err| {
        eprintln!("{} {:#}; using defaults", "⚠️".yellow(), err);
        BootstrapConfig::default()
    });
    let env = Environment::detect(&[config.git.program.as_str(), config.compose.program.as_str()])?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&env)?);
        return Ok(());
    }

    println!("--- Executable ---");
    println!("{}", env.executable);
    println!("\n--- Platform ---");
    println!("{} {} (in {})", env.os, env.arch, env.current_dir);

    println!("\n--- Tools ---");
    for (name, info) in &env.tools {
        if info.available {
            println!(
                "{} {} {} ({})",
                "✅".green(),
                name,
                info.version.as_deref().unwrap_or("unknown version"),
                info.path.as_deref().unwrap_or("")
            );
        } else {
            println!("{} {} not found", "❌".red(), name);
        }
    }

    println!("\n--- PATH (where tools are looked up) ---");
    for entry in &env.search_path {
        println!("{}", entry);
    }

    let missing = env.missing_tools();
    if !missing.is_empty() {
        eprintln!("\n{} missing: {}", "⚠️".yellow(), missing.join(", "));
    }
    Ok(())
}
