//! Error types for the XRPC client.

use thiserror::Error;

/// Errors that can occur when talking to the PDS.
#[derive(Debug, Error)]
pub enum BskyError {
    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rate limited by the PDS.
    #[error("rate limited{}", retry_after_secs.map(|s| format!(" (retry after {}s)", s)).unwrap_or_default())]
    RateLimited {
        /// Seconds to wait before retrying (from Retry-After header).
        retry_after_secs: Option<u64>,
    },

    /// XRPC error from the server.
    #[error("XRPC error ({status}): {error} - {message}")]
    Xrpc {
        status: u16,
        error: String,
        message: String,
    },

    /// Invalid response from the server.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
