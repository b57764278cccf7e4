//! Response bodies for the bridge's HTTP surface
//!
//! The bridge answers in exactly two shapes, and callers special-case on
//! which one they got:
//!
//! - Raw literal text for local failures that never reach the daemon
//!   (wrong API key, missing parameter)
//! - A JSON [`ResultEnvelope`] for every outcome of an actual management
//!   call, success or not
//!
//! Both are served with status 200; the body alone carries the outcome.

use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

/// Body returned when the `api_key` parameter does not match
pub const AUTH_FAILED: &str = "1";

/// Body returned when `user_key` is missing or empty
pub const MISSING_USER_KEY: &str = "missing user_key";

/// Body returned when the `direction` parameter is not recognized
pub const INVALID_DIRECTION: &str = "invalid direction";

/// Placeholder for a successful envelope with nothing to report
pub const EMPTY_DETAIL: &str = "0";

/// Uniform JSON envelope for management operation outcomes.
///
/// Serialized field names are part of the consumer contract:
/// `Success`, `Tag`, `User`, `UUID`, `Des`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultEnvelope {
    /// Whether the management call went through
    pub success: bool,
    /// Inbound tag the operation targeted (empty for traffic queries)
    pub tag: String,
    /// User key the operation applied to
    pub user: String,
    /// Account UUID; the bridge derives it from the user key
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Detail text: counter value, daemon error message, or "0"
    pub des: String,
}

impl ResultEnvelope {
    /// Successful outcome. An empty detail becomes the `"0"` placeholder so
    /// consumers always find a non-empty `Des`.
    pub fn ok(tag: impl Into<String>, user_key: impl Into<String>, des: impl Into<String>) -> Self {
        let des = des.into();
        let user_key = user_key.into();
        Self {
            success: true,
            tag: tag.into(),
            user: user_key.clone(),
            uuid: user_key,
            des: if des.is_empty() {
                EMPTY_DETAIL.to_string()
            } else {
                des
            },
        }
    }

    /// Failed outcome; `des` carries the daemon's message unmodified.
    pub fn err(
        tag: impl Into<String>,
        user_key: impl Into<String>,
        des: impl Into<String>,
    ) -> Self {
        let user_key = user_key.into();
        Self {
            success: false,
            tag: tag.into(),
            user: user_key.clone(),
            uuid: user_key,
            des: des.into(),
        }
    }
}

/// A reply from any bridge route
#[derive(Debug, Clone)]
pub enum BridgeReply {
    /// Literal text body (auth and validation failures, empty bodies)
    Raw(&'static str),
    /// Structured outcome envelope
    Envelope(ResultEnvelope),
}

impl IntoResponse for BridgeReply {
    fn into_response(self) -> Response {
        match self {
            BridgeReply::Raw(text) => text.into_response(),
            BridgeReply::Envelope(envelope) => Json(envelope).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_contract_field_names() {
        let envelope = ResultEnvelope::ok("proxy-in", "alice", "42");
        let value: serde_json::Value = serde_json::to_value(&envelope).unwrap();

        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Des", "Success", "Tag", "UUID", "User"]);

        assert_eq!(value["Success"], serde_json::json!(true));
        assert_eq!(value["Tag"], serde_json::json!("proxy-in"));
        assert_eq!(value["User"], serde_json::json!("alice"));
        assert_eq!(value["UUID"], serde_json::json!("alice"));
        assert_eq!(value["Des"], serde_json::json!("42"));
    }

    #[test]
    fn test_ok_substitutes_placeholder_for_empty_detail() {
        let envelope = ResultEnvelope::ok("proxy-in", "alice", "");
        assert!(envelope.success);
        assert_eq!(envelope.des, EMPTY_DETAIL);
    }

    #[test]
    fn test_err_keeps_detail_verbatim() {
        let envelope = ResultEnvelope::err("proxy-in", "alice", "User alice already exists.");
        assert!(!envelope.success);
        assert_eq!(envelope.des, "User alice already exists.");
        assert_eq!(envelope.user, "alice");
        assert_eq!(envelope.uuid, "alice");
    }

    #[test]
    fn test_raw_literals_are_distinct() {
        // Callers dispatch on exact body text, so the three literals must
        // never collide with each other
        assert_ne!(AUTH_FAILED, MISSING_USER_KEY);
        assert_ne!(AUTH_FAILED, INVALID_DIRECTION);
        assert_ne!(MISSING_USER_KEY, INVALID_DIRECTION);
    }
}
