//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// regsweep - find and delete orphaned registry manifests
///
/// Lists the manifests of a container registry repository through the
/// registry's management CLI, reports which are tagged and which are
/// orphaned, and can delete the orphaned ones.
#[derive(Parser, Debug)]
#[command(name = "regsweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(long, global = true, env = "REGSWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report tagged and orphaned manifests, optionally deleting orphans
    #[command(name = "repository:clean")]
    Clean(CleanArgs),

    /// Manage cached manifest listings
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the repository:clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Name of registry
    pub registry: String,

    /// Name of repository
    pub repository: String,

    /// How long to cache registry responses, in seconds (default: from config)
    #[arg(short = 'c', long = "cacheExpireSeconds", value_name = "SECONDS")]
    pub cache_expire_seconds: Option<u64>,

    /// Delete orphaned manifests after reporting them
    #[arg(short, long)]
    pub delete: bool,

    /// Ignore any cached listing and ask the registry again
    #[arg(long)]
    pub refresh: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached manifest listings
    List,

    /// Remove all cached manifest listings
    Clear,

    /// Show the cache directory
    Path,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
