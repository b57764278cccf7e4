//! Traffic query handler

use super::error_detail;
use crate::reply::{BridgeReply, ResultEnvelope, INVALID_DIRECTION, MISSING_USER_KEY};
use crate::state::BridgeState;
use axum::extract::{Query, State};
use relayctl_management::TrafficDirection;
use serde::Deserialize;
use tracing::{info, instrument};

/// Query parameters for `/getTraffic`
#[derive(Debug, Deserialize)]
pub struct TrafficQuery {
    #[serde(default)]
    pub user_key: String,
    /// "1" or "true" zeroes matched counters after the read
    #[serde(default)]
    pub is_reset: String,
    /// "uplink" (default), "downlink", or "both"
    #[serde(default)]
    pub direction: Option<String>,
}

/// Read a user's traffic counters.
///
/// The reply envelope carries the byte total as a decimal string in `Des`,
/// with `"0"` standing in when the daemon has no matching counters. `Tag`
/// stays empty; traffic counters are not scoped to an inbound.
#[instrument(skip(state, params), fields(user_key = %params.user_key))]
pub async fn get_traffic(
    State(state): State<BridgeState>,
    Query(params): Query<TrafficQuery>,
) -> BridgeReply {
    if params.user_key.is_empty() {
        return BridgeReply::Raw(MISSING_USER_KEY);
    }

    let direction = match params.direction.as_deref() {
        // An absent or empty parameter keeps the historical default
        None | Some("") => TrafficDirection::Uplink,
        Some(value) => match TrafficDirection::parse(value) {
            Some(direction) => direction,
            None => return BridgeReply::Raw(INVALID_DIRECTION),
        },
    };
    let reset = matches!(params.is_reset.as_str(), "1" | "true");

    info!(?direction, reset, "HTTP: getTraffic");
    match state
        .management
        .query_traffic(&params.user_key, direction, reset)
        .await
    {
        Ok(Some(total)) => {
            BridgeReply::Envelope(ResultEnvelope::ok("", &params.user_key, total.to_string()))
        }
        // No matching counters is not an error, just nothing to report
        Ok(None) => BridgeReply::Envelope(ResultEnvelope::ok("", &params.user_key, "")),
        Err(err) => {
            BridgeReply::Envelope(ResultEnvelope::err("", &params.user_key, error_detail(&err)))
        }
    }
}
