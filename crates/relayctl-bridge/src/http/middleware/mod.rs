//! HTTP middleware

mod auth;

pub(crate) use auth::auth_middleware;
