//! regsweep - registry manifest cleanup
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use regsweep::cli::{Cli, Commands};
use regsweep::config::ConfigManager;
use regsweep::error::SweepResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> SweepResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("regsweep=warn"),
        1 => EnvFilter::new("regsweep=info"),
        _ => EnvFilter::new("regsweep=debug"),
    };

    // stdout carries the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Clean(args) => regsweep::cli::commands::clean(args, &config).await,
        Commands::Cache(args) => regsweep::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            regsweep::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
