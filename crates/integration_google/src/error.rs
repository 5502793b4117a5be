//! Google provider error types

use thiserror::Error;

/// Errors that can occur while talking to the Google web services
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed or the API reported an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response body or an encoded polyline
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded (HTTP 429 or `OVER_QUERY_LIMIT`)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

    /// No route exists between the given points (`ZERO_RESULTS`)
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// The request was rejected as malformed (`INVALID_REQUEST`)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Service is temporarily unavailable (HTTP 5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Missing or rejected credentials (`REQUEST_DENIED`)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GoogleError {
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

    /// Map a non-success API status (the in-body `status` field, not the
    /// HTTP status) onto a typed error.
    pub(crate) fn from_api_status(status: &str, error_message: Option<String>) -> Self {
        let message =
            |fallback: &str| error_message.clone().unwrap_or_else(|| fallback.to_string());

        match status {
            "OVER_QUERY_LIMIT" => Self::RateLimitExceeded {
                retry_after_secs: None,
            },
            "REQUEST_DENIED" => Self::ConfigurationError(message("request denied")),
            "INVALID_REQUEST" => Self::InvalidRequest(message("invalid request")),
            other => Self::RequestFailed(format!("Status {other}: {}", message("no detail"))),
        }
    }
}
