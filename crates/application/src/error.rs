//! Application-level routing errors

use domain::value_objects::InvalidCoordinates;
use thiserror::Error;

/// Errors the routing facade and its ports surface to callers.
///
/// Adapters map provider-specific failures onto these variants; the facade
/// passes them through unchanged. Expected absence of data (an empty search)
/// is not an error and never appears here.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The active provider pair is missing a required credential
    #[error("Routing provider not configured: {0}")]
    NotConfigured(String),

    /// Network failure or non-2xx HTTP response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The bounded per-request timeout elapsed
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Provider rejected the request for quota reasons
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

    /// Valid request, but the provider found no route
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// Malformed polyline or unexpected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Caller-side input problem (too few waypoints, empty query, ...)
    #[error("Validation error: {0}")]
    Validation(String),
}

impl RoutingError {
    /// Returns true if a later identical call might succeed.
    ///
    /// The core itself never retries; this classification is for the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true when the failure is the unconfigured fast path
    #[must_use]
    pub const fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}

impl From<InvalidCoordinates> for RoutingError {
    fn from(err: InvalidCoordinates) -> Self {
        Self::Validation(err.to_string())
    }
}
