//! Error types for management API operations.

use thiserror::Error;

/// Error type for management API operations.
#[derive(Debug, Error)]
pub enum ManagementError {
    /// The management endpoint could not be reached.
    #[error("failed to reach management API: {0}")]
    Connect(#[from] tonic::transport::Error),

    /// The daemon accepted the connection but rejected the call.
    #[error("management API rejected the request: {0}")]
    Rejected(String),
}

impl From<tonic::Status> for ManagementError {
    /// Keep the daemon's own message text; callers surface it verbatim.
    fn from(status: tonic::Status) -> Self {
        ManagementError::Rejected(status.message().to_string())
    }
}
