//! OpenStreetMap provider error types

use thiserror::Error;

/// Errors that can occur while talking to OpenRouteService or Overpass
#[derive(Debug, Error)]
pub enum OsmError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

    /// No route exists between the given points
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// The request was rejected as malformed before any network call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Service is temporarily unavailable (HTTP 5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error (missing or unusable credentials)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OsmError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}
