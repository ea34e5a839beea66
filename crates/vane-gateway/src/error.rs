//! Error types for rollout gateway calls.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while talking to the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// More than one item came back for a lookup that must be unique.
    #[error("{0}")]
    Ambiguous(String),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request could not be sent, or the response could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Transport(e.to_string())
    }
}
