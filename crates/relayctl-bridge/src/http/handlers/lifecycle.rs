//! Bridge lifecycle handlers
//!
//! `/quit` and the catch-all for unknown paths.

use crate::reply::BridgeReply;
use crate::state::BridgeState;
use axum::extract::State;
use axum::http::Uri;
use tracing::{debug, info, warn};

/// Administrative shutdown.
///
/// Flips the shutdown channel and returns an empty body; the server then
/// stops accepting connections and drains in-flight requests before the
/// process exits. The log line is the audit record of who asked it to stop.
pub async fn quit(State(state): State<BridgeState>) -> BridgeReply {
    info!("HTTP: quit - shutdown requested by authenticated caller");
    if state.quit.send(true).is_err() {
        warn!("Shutdown signal had no receiver; server task already gone");
    }
    BridgeReply::Raw("")
}

/// Catch-all for paths the router does not know.
///
/// Replies with an empty 200 body. Consumers treat unrouted paths as
/// silently ignored, not as 404s.
pub async fn unknown_path(uri: Uri) -> BridgeReply {
    debug!(path = %uri.path(), "No route matched");
    BridgeReply::Raw("")
}
