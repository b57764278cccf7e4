//! HTTP surface of the bridge

pub mod handlers;
pub mod middleware;
pub mod paths;
pub mod routes;
pub mod server;

pub use routes::create_router;
pub use server::BridgeServer;
