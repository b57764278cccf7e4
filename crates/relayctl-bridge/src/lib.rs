//! relayctl-bridge: HTTP bridge in front of the proxy daemon's management API
//!
//! The bridge accepts the legacy GET-with-query-parameters consumer protocol,
//! authenticates each request against a shared `api_key`, translates it into
//! exactly one management API call, and answers with either a raw literal
//! body or a JSON result envelope. The management capability is injected as
//! an [`relayctl_management::ManagementApi`] trait object so the HTTP layer
//! can be exercised without a live daemon.
//!
//! ```no_run
//! use relayctl_bridge::{BridgeServer, BridgeState};
//! use relayctl_management::ManagementClient;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio::sync::watch;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client =
//!     ManagementClient::connect("http://127.0.0.1:10085", Duration::from_secs(10)).await?;
//! let (quit_tx, quit_rx) = watch::channel(false);
//! let state = BridgeState::new(Arc::new(client), "secret", quit_tx);
//! let handle = BridgeServer::new("127.0.0.1:8765", state)
//!     .start_with_shutdown(quit_rx)
//!     .await?;
//! handle.await?;
//! # Ok(())
//! # }
//! ```

pub mod http;
mod reply;
mod state;

pub use http::{create_router, BridgeServer};
pub use reply::{
    BridgeReply, ResultEnvelope, AUTH_FAILED, EMPTY_DETAIL, INVALID_DIRECTION, MISSING_USER_KEY,
};
pub use state::BridgeState;
