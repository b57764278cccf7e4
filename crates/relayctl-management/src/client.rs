//! gRPC client for the daemon's management API
//!
//! The daemon exposes two unary methods the bridge cares about: one to alter
//! an inbound's user list and one to query traffic counters. Calls are made
//! directly through `tonic::client::Grpc` against the hand-written message
//! types in [`crate::proto`].
//!
//! Handlers depend on the [`ManagementApi`] trait rather than the concrete
//! client so tests can swap in an in-memory implementation.

use crate::error::ManagementError;
use crate::proto::{
    AddUserOperation, AlterInboundRequest, AlterInboundResponse, QueryStatsRequest,
    QueryStatsResponse, RemoveUserOperation, SecurityKind, SecuritySettings, TypedPayload,
    UserCredential, VmessAccount, ADD_USER_OPERATION_TYPE, ALTER_INBOUND_PATH, QUERY_STATS_PATH,
    REMOVE_USER_OPERATION_TYPE, VMESS_ACCOUNT_TYPE,
};
use async_trait::async_trait;
use http::uri::PathAndQuery;
use prost::Message;
use std::time::Duration;
use tonic::client::Grpc;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

/// Which traffic counters a query reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficDirection {
    /// Client-to-server bytes
    Uplink,
    /// Server-to-client bytes
    Downlink,
    /// Sum of both directions
    Both,
}

impl TrafficDirection {
    /// Parse a `direction` query parameter value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "uplink" => Some(TrafficDirection::Uplink),
            "downlink" => Some(TrafficDirection::Downlink),
            "both" => Some(TrafficDirection::Both),
            _ => None,
        }
    }

    /// Counter-name pattern submitted to the stats service.
    ///
    /// The daemon matches patterns as substrings, so `Both` uses the common
    /// prefix and selects uplink and downlink at once.
    pub fn stat_pattern(&self, user_key: &str) -> String {
        match self {
            TrafficDirection::Uplink => format!("user>>>{}>>>traffic>>>uplink", user_key),
            TrafficDirection::Downlink => format!("user>>>{}>>>traffic>>>downlink", user_key),
            TrafficDirection::Both => format!("user>>>{}>>>traffic>>>", user_key),
        }
    }
}

/// Operations the bridge needs from the daemon's management API.
///
/// Implemented by [`ManagementClient`] for the real daemon and by in-memory
/// fakes in handler tests.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Add a vmess user to the inbound identified by `tag`.
    ///
    /// `user_key` becomes both the user's email (its identity on the
    /// inbound) and the account UUID.
    async fn add_user(&self, tag: &str, user_key: &str) -> Result<(), ManagementError>;

    /// Remove the user identified by `user_key` from the inbound `tag`.
    async fn remove_user(&self, tag: &str, user_key: &str) -> Result<(), ManagementError>;

    /// Read traffic counters for `user_key`.
    ///
    /// Returns `Ok(None)` when the daemon has no matching counters (the user
    /// has never transferred data), `Ok(Some(total))` otherwise. With
    /// `reset`, matched counters are zeroed after the read.
    async fn query_traffic(
        &self,
        user_key: &str,
        direction: TrafficDirection,
        reset: bool,
    ) -> Result<Option<i64>, ManagementError>;
}

/// gRPC client for the daemon's management API
#[derive(Clone)]
pub struct ManagementClient {
    grpc: Grpc<Channel>,
}

impl ManagementClient {
    /// Create a client from an existing channel
    pub fn new(channel: Channel) -> Self {
        Self {
            grpc: Grpc::new(channel),
        }
    }

    /// Connect to the management API, establishing the channel eagerly.
    ///
    /// `url` is a plaintext HTTP/2 endpoint such as `http://127.0.0.1:10085`.
    pub async fn connect(
        url: impl Into<String>,
        connect_timeout: Duration,
    ) -> Result<Self, ManagementError> {
        let url = url.into();
        debug!(url = %url, "Connecting to management API");
        let channel = Endpoint::from_shared(url)?
            .connect_timeout(connect_timeout)
            .connect()
            .await?;
        Ok(Self::new(channel))
    }

    async fn alter_inbound(
        &self,
        request: AlterInboundRequest,
    ) -> Result<AlterInboundResponse, ManagementError> {
        // Grpc requires &mut self; the handle is cheap to clone and shares
        // the underlying channel
        let mut grpc = self.grpc.clone();
        grpc.ready().await?;
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(ALTER_INBOUND_PATH),
                tonic::codec::ProstCodec::default(),
            )
            .await?;
        Ok(response.into_inner())
    }

    async fn query_stats(
        &self,
        request: QueryStatsRequest,
    ) -> Result<QueryStatsResponse, ManagementError> {
        let mut grpc = self.grpc.clone();
        grpc.ready().await?;
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(QUERY_STATS_PATH),
                tonic::codec::ProstCodec::default(),
            )
            .await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl ManagementApi for ManagementClient {
    async fn add_user(&self, tag: &str, user_key: &str) -> Result<(), ManagementError> {
        debug!(tag = %tag, user_key = %user_key, "Adding user to inbound");
        self.alter_inbound(build_add_user_request(tag, user_key))
            .await?;
        Ok(())
    }

    async fn remove_user(&self, tag: &str, user_key: &str) -> Result<(), ManagementError> {
        debug!(tag = %tag, user_key = %user_key, "Removing user from inbound");
        self.alter_inbound(build_remove_user_request(tag, user_key))
            .await?;
        Ok(())
    }

    async fn query_traffic(
        &self,
        user_key: &str,
        direction: TrafficDirection,
        reset: bool,
    ) -> Result<Option<i64>, ManagementError> {
        debug!(user_key = %user_key, ?direction, reset, "Querying traffic counters");
        let response = self
            .query_stats(QueryStatsRequest {
                pattern: direction.stat_pattern(user_key),
                reset,
            })
            .await?;
        Ok(total_from_stats(&response))
    }
}

/// Build the alter-inbound request that adds `user_key` as a vmess user.
///
/// The key doubles as email and account UUID, level 0, alterId 0, cipher
/// negotiated (`Auto`).
fn build_add_user_request(tag: &str, user_key: &str) -> AlterInboundRequest {
    let account = VmessAccount {
        id: user_key.to_string(),
        alter_id: 0,
        security: Some(SecuritySettings {
            kind: SecurityKind::Auto as i32,
        }),
    };
    let operation = AddUserOperation {
        user: Some(UserCredential {
            level: 0,
            email: user_key.to_string(),
            account: Some(TypedPayload {
                kind: VMESS_ACCOUNT_TYPE.to_string(),
                value: account.encode_to_vec(),
            }),
        }),
    };
    AlterInboundRequest {
        tag: tag.to_string(),
        operation: Some(TypedPayload {
            kind: ADD_USER_OPERATION_TYPE.to_string(),
            value: operation.encode_to_vec(),
        }),
    }
}

/// Build the alter-inbound request that removes the user `user_key`
fn build_remove_user_request(tag: &str, user_key: &str) -> AlterInboundRequest {
    let operation = RemoveUserOperation {
        email: user_key.to_string(),
    };
    AlterInboundRequest {
        tag: tag.to_string(),
        operation: Some(TypedPayload {
            kind: REMOVE_USER_OPERATION_TYPE.to_string(),
            value: operation.encode_to_vec(),
        }),
    }
}

/// Sum counter values, or `None` when no counter matched
fn total_from_stats(response: &QueryStatsResponse) -> Option<i64> {
    if response.stat.is_empty() {
        return None;
    }
    Some(response.stat.iter().map(|s| s.value).sum())
}
