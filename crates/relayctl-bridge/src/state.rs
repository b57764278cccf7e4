//! Shared state for the bridge's HTTP layer

use relayctl_management::ManagementApi;
use std::sync::Arc;
use tokio::sync::watch;

/// State shared by every request handler.
///
/// The management capability is injected once at construction and never
/// reassigned; handlers hold no other mutable state.
#[derive(Clone)]
pub struct BridgeState {
    /// Management API the translator calls into
    pub management: Arc<dyn ManagementApi>,
    /// Shared secret expected in the `api_key` query parameter
    pub api_key: String,
    /// Shutdown trigger flipped by the `/quit` route
    pub quit: watch::Sender<bool>,
}

impl BridgeState {
    pub fn new(
        management: Arc<dyn ManagementApi>,
        api_key: impl Into<String>,
        quit: watch::Sender<bool>,
    ) -> Self {
        Self {
            management,
            api_key: api_key.into(),
            quit,
        }
    }
}
