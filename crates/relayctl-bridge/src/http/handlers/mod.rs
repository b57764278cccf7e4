//! HTTP request handlers
//!
//! Each handler:
//! - Validates query parameters locally (raw-text replies, zero RPC)
//! - Makes exactly one management call
//! - Shapes the outcome into a [`crate::reply::BridgeReply`]
//!
//! No business logic lives here; the daemon owns user state and counters.

mod lifecycle;
mod traffic;
mod users;

pub use lifecycle::{quit, unknown_path};
pub use traffic::{get_traffic, TrafficQuery};
pub use users::{add_user, remove_user, UserActionQuery};

use relayctl_management::ManagementError;

/// Detail text for an envelope describing a failed management call.
///
/// A daemon rejection must surface its message verbatim; consumers match on
/// the exact text. Transport errors keep their describing prefix.
pub(crate) fn error_detail(err: &ManagementError) -> String {
    match err {
        ManagementError::Rejected(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_unwraps_rejections() {
        let err = ManagementError::Rejected("User alice already exists.".to_string());
        assert_eq!(error_detail(&err), "User alice already exists.");
    }
}
