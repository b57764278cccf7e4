//! HTTP server lifecycle
//!
//! Binds the listener and serves the bridge router until the shutdown
//! channel flips, then drains in-flight requests and returns.

use super::routes::create_router;
use crate::state::BridgeState;
use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// HTTP side of the bridge
pub struct BridgeServer {
    addr: String,
    state: BridgeState,
}

impl BridgeServer {
    pub fn new(addr: impl Into<String>, state: BridgeState) -> Self {
        Self {
            addr: addr.into(),
            state,
        }
    }

    /// Bind and serve in a background task.
    ///
    /// Binding happens before the task is spawned so that a busy port is
    /// reported to the caller instead of a detached task. The returned
    /// handle resolves once the server has drained and stopped.
    pub async fn start_with_shutdown(
        self,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Result<JoinHandle<()>> {
        info!("🌐 Starting HTTP bridge on {}...", self.addr);

        let router = create_router(self.state);
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind HTTP bridge on {}: {}", self.addr, e))?;

        info!("✓ HTTP bridge listening on {}", self.addr);

        let handle = tokio::spawn(async move {
            let mut rx = shutdown_rx;
            let shutdown_signal = async move {
                loop {
                    if *rx.borrow() {
                        break;
                    }
                    if rx.changed().await.is_err() {
                        // Sender dropped; treat as shutdown
                        break;
                    }
                }
                info!("HTTP bridge received shutdown signal");
            };

            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal)
                .await
            {
                error!("HTTP bridge error: {}", e);
            }

            info!("HTTP bridge stopped");
        });

        Ok(handle)
    }
}
