//! CLI module for Zenith
//!
//! Command-line interface definitions and handlers for the status monitor.
//!
//! # Commands
//!
//! - `watch` - Run the adaptive poller and stream status changes
//! - `check` - Probe every target once and print the result
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Write a starter config, then watch it
//! zenith config init
//! zenith watch
//!
//! # One-shot check as JSON
//! zenith check --json
//! ```

pub mod check;
pub mod completions;
pub mod config;
pub mod output;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Zenith - inference service status monitor
#[derive(Parser, Debug)]
#[command(
    name = "zenith",
    version,
    about = "Adaptive health-status polling for remote inference services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll targets with backoff and print every published snapshot
    Watch(WatchArgs),
    /// Probe every target once
    Check(CheckArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "zenith.toml")]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ZENITH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override the failing-cycle budget
    #[arg(short, long)]
    pub max_attempts: Option<u32>,

    /// Override the backoff base in milliseconds
    #[arg(short, long)]
    pub base_interval_ms: Option<u64>,

    /// Disable automatic polling; only `refresh` probes
    #[arg(long)]
    pub no_polling: bool,

    /// Start as if the host view were hidden
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "zenith.toml")]
    pub config: PathBuf,

    /// Override the per-probe timeout in milliseconds
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "zenith.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,

    /// Monitored service as KEY=URL; replaces the sample targets (repeatable)
    #[arg(short, long = "target", value_name = "KEY=URL")]
    pub targets: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
