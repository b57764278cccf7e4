//! Authentication middleware
//!
//! Shared-secret authentication via the `api_key` query parameter. A
//! mismatch is answered with status 200 and the literal body `"1"`; the
//! status code is not part of the consumer contract, the body text is.
//!
//! The comparison is a plain string equality against a key the server
//! refuses to start without. The key travels in the clear, so this layer
//! assumes a trusted network or an external TLS terminator.

use crate::reply::{BridgeReply, AUTH_FAILED};
use crate::state::BridgeState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct AuthParams {
    api_key: Option<String>,
}

/// Authentication middleware
///
/// Every route, including the fallback, sits behind this check. On a
/// missing or wrong key the request stops here; no handler and no
/// management call ever runs.
pub(crate) async fn auth_middleware(
    State(state): State<BridgeState>,
    Query(params): Query<AuthParams>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if params.api_key.as_deref() != Some(state.api_key.as_str()) {
        warn!(path = %request.uri().path(), "API key mismatch");
        return BridgeReply::Raw(AUTH_FAILED).into_response();
    }

    next.run(request).await
}
