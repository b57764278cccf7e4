//! relayctl - control-plane CLI for a V2Ray-compatible proxy daemon
//!
//! `serve` runs the HTTP bridge in front of the daemon's gRPC management
//! API; `daemon start/stop/restart/status` manages the daemon process
//! itself; `init` writes a starter configuration.

mod commands;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::daemon::DaemonAction;
use relayctl_config::resolve_config_path;
use relayctl_logging::LogConfig;
use std::path::PathBuf;

/// HTTP bridge and lifecycle manager for a V2Ray-compatible proxy daemon
#[derive(Parser)]
#[command(name = "relayctl", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter configuration file
    Init {
        /// Write the config to a custom path
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Run the HTTP bridge in the foreground
    Serve {
        /// Override the bridge listen host
        #[arg(long)]
        host: Option<String>,
        /// Override the bridge listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Manage the proxy daemon process
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => {
            relayctl_logging::init(LogConfig::cli(cli.debug));
            commands::init::run(path, force)
        }
        Commands::Serve { host, port } => {
            // serve configures logging itself once the file settings are known
            let (config_path, _source) = resolve_config_path(cli.config.as_deref());
            let config = relayctl_config::load_config(&config_path)?;
            commands::serve::run(&config_path, config, host, port, cli.debug).await
        }
        Commands::Daemon { action } => {
            relayctl_logging::init(LogConfig::cli(cli.debug));
            let (config_path, _source) = resolve_config_path(cli.config.as_deref());
            let config = relayctl_config::load_config(&config_path)?;
            commands::daemon::run(&config, action).await
        }
    }
}
