//! Wire types for the proxy daemon's management API
//!
//! The daemon speaks the V2Ray management protocol: protobuf messages over
//! gRPC, with operation payloads wrapped in a typed envelope (a type URL plus
//! the encoded bytes). Only the two methods the bridge needs are modeled
//! here; the messages are written out by hand with explicit field tags so the
//! crate does not depend on protoc at build time.
//!
//! Field numbers must match the daemon's `.proto` definitions exactly, so
//! treat every `tag` below as part of the wire contract.

// ============================================================================
// Service Method Paths
// ============================================================================

/// Unary method that mutates an inbound's user list
pub const ALTER_INBOUND_PATH: &str =
    "/v2ray.core.app.proxyman.command.HandlerService/AlterInbound";

/// Unary method that reads traffic counters
pub const QUERY_STATS_PATH: &str = "/v2ray.core.app.stats.command.StatsService/QueryStats";

// ============================================================================
// Type URLs
// ============================================================================

/// Type URL identifying an add-user operation payload
pub const ADD_USER_OPERATION_TYPE: &str = "v2ray.core.app.proxyman.command.AddUserOperation";

/// Type URL identifying a remove-user operation payload
pub const REMOVE_USER_OPERATION_TYPE: &str =
    "v2ray.core.app.proxyman.command.RemoveUserOperation";

/// Type URL identifying a vmess account payload
pub const VMESS_ACCOUNT_TYPE: &str = "v2ray.core.proxy.vmess.Account";

// ============================================================================
// Messages
// ============================================================================

/// Typed envelope the daemon uses wherever a field can carry more than one
/// message kind. `kind` is a type URL, `value` the encoded message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypedPayload {
    #[prost(string, tag = "1")]
    pub kind: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

/// A user entry on an inbound. `account` carries a protocol-specific account
/// payload ([`VMESS_ACCOUNT_TYPE`] for vmess inbounds).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserCredential {
    #[prost(uint32, tag = "1")]
    pub level: u32,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(message, optional, tag = "3")]
    pub account: Option<TypedPayload>,
}

/// Vmess account settings for a user
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VmessAccount {
    /// Account UUID
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(uint32, tag = "2")]
    pub alter_id: u32,
    #[prost(message, optional, tag = "3")]
    pub security: Option<SecuritySettings>,
}

/// Cipher selection for a vmess account
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SecuritySettings {
    #[prost(enumeration = "SecurityKind", tag = "1")]
    pub kind: i32,
}

/// Vmess cipher kinds understood by the daemon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SecurityKind {
    Unknown = 0,
    Legacy = 1,
    Auto = 2,
    Aes128Gcm = 3,
    Chacha20Poly1305 = 4,
    None = 5,
}

/// Payload of an [`ADD_USER_OPERATION_TYPE`] envelope
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddUserOperation {
    #[prost(message, optional, tag = "1")]
    pub user: Option<UserCredential>,
}

/// Payload of a [`REMOVE_USER_OPERATION_TYPE`] envelope. Users are addressed
/// by email, never by UUID.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveUserOperation {
    #[prost(string, tag = "1")]
    pub email: String,
}

/// Request for [`ALTER_INBOUND_PATH`]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AlterInboundRequest {
    /// Inbound tag the operation applies to
    #[prost(string, tag = "1")]
    pub tag: String,
    #[prost(message, optional, tag = "2")]
    pub operation: Option<TypedPayload>,
}

/// Response for [`ALTER_INBOUND_PATH`]; success carries no data
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AlterInboundResponse {}

/// Request for [`QUERY_STATS_PATH`]. The daemon matches `pattern` as a
/// substring against counter names, so a trailing-separator pattern selects
/// every direction at once. `reset` zeroes matched counters after reading.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryStatsRequest {
    #[prost(string, tag = "1")]
    pub pattern: String,
    #[prost(bool, tag = "2")]
    pub reset: bool,
}

/// A single named counter value
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Stat {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(int64, tag = "2")]
    pub value: i64,
}

/// Response for [`QUERY_STATS_PATH`]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryStatsResponse {
    #[prost(message, repeated, tag = "1")]
    pub stat: Vec<Stat>,
}
