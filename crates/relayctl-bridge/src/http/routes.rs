//! HTTP route configuration
//!
//! Wires up handlers into an axum Router.

use super::handlers::{add_user, get_traffic, quit, remove_user, unknown_path};
use super::middleware::auth_middleware;
use super::paths;
use crate::state::BridgeState;
use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the bridge router.
///
/// All routes are GET-only; the consumer protocol sends every operation as
/// a GET with query parameters. The auth middleware wraps everything, the
/// fallback included, so an unknown path with a bad key still answers `"1"`.
pub fn create_router(state: BridgeState) -> Router {
    info!("Creating HTTP router");

    Router::new()
        .route(paths::ADD_USER, get(add_user))
        .route(paths::REMOVE_USER, get(remove_user))
        .route(paths::GET_TRAFFIC, get(get_traffic))
        .route(paths::QUIT, get(quit))
        .fallback(unknown_path)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
