//! User mutation handlers
//!
//! Endpoints that add a user to or remove a user from an inbound.

use super::error_detail;
use crate::reply::{BridgeReply, ResultEnvelope, MISSING_USER_KEY};
use crate::state::BridgeState;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::{info, instrument};

/// Query parameters shared by `/addUser` and `/removeUser`
#[derive(Debug, Deserialize)]
pub struct UserActionQuery {
    /// User identity; doubles as the vmess account UUID
    #[serde(default)]
    pub user_key: String,
    /// Inbound tag. Forwarded as-is; an empty tag is the daemon's to reject.
    #[serde(default)]
    pub tag: String,
}

/// Add a user to an inbound
#[instrument(skip(state, params), fields(user_key = %params.user_key, tag = %params.tag))]
pub async fn add_user(
    State(state): State<BridgeState>,
    Query(params): Query<UserActionQuery>,
) -> BridgeReply {
    if params.user_key.is_empty() {
        return BridgeReply::Raw(MISSING_USER_KEY);
    }

    info!("HTTP: addUser");
    match state.management.add_user(&params.tag, &params.user_key).await {
        Ok(()) => BridgeReply::Envelope(ResultEnvelope::ok(&params.tag, &params.user_key, "")),
        Err(err) => BridgeReply::Envelope(ResultEnvelope::err(
            &params.tag,
            &params.user_key,
            error_detail(&err),
        )),
    }
}

/// Remove a user from an inbound
#[instrument(skip(state, params), fields(user_key = %params.user_key, tag = %params.tag))]
pub async fn remove_user(
    State(state): State<BridgeState>,
    Query(params): Query<UserActionQuery>,
) -> BridgeReply {
    if params.user_key.is_empty() {
        return BridgeReply::Raw(MISSING_USER_KEY);
    }

    info!("HTTP: removeUser");
    match state
        .management
        .remove_user(&params.tag, &params.user_key)
        .await
    {
        Ok(()) => BridgeReply::Envelope(ResultEnvelope::ok(&params.tag, &params.user_key, "")),
        Err(err) => BridgeReply::Envelope(ResultEnvelope::err(
            &params.tag,
            &params.user_key,
            error_detail(&err),
        )),
    }
}
