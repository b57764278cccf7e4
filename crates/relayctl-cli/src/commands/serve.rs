//! Serve command - run the HTTP bridge in the foreground
//!
//! Connects to the daemon's management API, starts the HTTP bridge, and
//! blocks until SIGTERM, SIGINT, or an authenticated `/quit` request. All
//! three paths drain the server through the same shutdown channel, so the
//! process exits 0 after a graceful stop.

use anyhow::{Context, Result};
use relayctl_bridge::{BridgeServer, BridgeState};
use relayctl_config::{Config, LoggingConfig};
use relayctl_logging::{debug, info, warn, LogConfig, WorkerGuard};
use relayctl_management::ManagementClient;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub async fn run(
    config_path: &Path,
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    debug: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.bridge.host = host;
    }
    if let Some(port) = port {
        config.bridge.port = port;
    }

    // An empty key would compare equal to an absent api_key parameter, so
    // serve refuses to come up without one
    config
        .bridge
        .validate_api_key()
        .map_err(|e| anyhow::anyhow!(e))?;

    let _log_guard = init_logging(&config.logging, debug)?;

    if config.logging.file_logging_enabled {
        match relayctl_logging::cleanup_old_logs(
            &config.logging.log_dir_path(),
            &config.logging.bridge_log_file,
            config.logging.log_retention_days,
        ) {
            Ok(0) => debug!("No old log files to clean up"),
            Ok(n) => info!("🧹 Cleaned up {} old log file(s)", n),
            Err(e) => warn!("Failed to clean up old logs: {}", e),
        }
    }

    info!("🚀 Starting relayctl bridge...");
    info!("✓ Configuration loaded from {}", config_path.display());

    let endpoint = config.management.endpoint_url();
    info!("Connecting to management API at {}...", endpoint);

    let client = ManagementClient::connect(
        endpoint,
        Duration::from_millis(config.management.connect_timeout_ms),
    )
    .await
    .context("Failed to connect to management API")?;

    info!("✓ Management API connected");

    // One channel serves both shutdown paths: /quit flips it from inside a
    // request, the signal handlers flip it from outside
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let state = BridgeState::new(
        Arc::new(client),
        config.bridge.api_key.clone(),
        shutdown_tx.clone(),
    );

    let bind_addr = config.bridge.bind_addr();
    let server = BridgeServer::new(bind_addr.as_str(), state);
    let handle = server
        .start_with_shutdown(shutdown_rx.clone())
        .await
        .context("Failed to start HTTP bridge")?;

    info!("📊 Bridge ready (Ctrl+C to stop)");
    info!("   HTTP API available at http://{}", bind_addr);

    wait_for_shutdown(shutdown_rx).await?;

    info!("🛑 Shutting down...");
    let _ = shutdown_tx.send(true);
    let _ = handle.await;

    info!("✓ relayctl bridge stopped");
    Ok(())
}

/// Block until SIGTERM, SIGINT, or the `/quit` route fires
async fn wait_for_shutdown(mut quit_rx: watch::Receiver<bool>) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = quit_rx.changed() => {
            if *quit_rx.borrow() {
                info!("Received quit request over HTTP");
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig, debug: bool) -> Result<Option<WorkerGuard>> {
    let mut log_config = if logging.file_logging_enabled {
        LogConfig::daemon(debug)
    } else {
        LogConfig::cli(debug)
    };
    if logging.use_utc {
        log_config = log_config.utc();
    }

    if logging.file_logging_enabled {
        let guard = relayctl_logging::init_with_file(log_config, &logging.bridge_log_path())
            .context("Failed to initialize file logging")?;
        Ok(Some(guard))
    } else {
        relayctl_logging::init(log_config);
        Ok(None)
    }
}
