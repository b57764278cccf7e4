//! gRPC client for the proxy daemon's management API
//!
//! This crate provides:
//! - Hand-written protobuf message types for the daemon's handler and stats
//!   services ([`proto`])
//! - A connected client ([`ManagementClient`]) implementing the
//!   [`ManagementApi`] trait the HTTP bridge is written against
//!
//! The crate is deliberately config-free: callers pass the endpoint URL and
//! timeouts in.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relayctl_management::{ManagementClient, TrafficDirection};
//! use std::time::Duration;
//!
//! let client = ManagementClient::connect(
//!     "http://127.0.0.1:10085",
//!     Duration::from_secs(10),
//! )
//! .await?;
//! client.add_user("proxy-in", "alice@example.com").await?;
//! let total = client
//!     .query_traffic("alice@example.com", TrafficDirection::Both, false)
//!     .await?;
//! ```

mod client;
mod error;
pub mod proto;

pub use client::{ManagementApi, ManagementClient, TrafficDirection};
pub use error::ManagementError;
