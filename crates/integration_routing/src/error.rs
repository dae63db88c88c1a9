//! Routing error types

use thiserror::Error;

/// Errors that can occur while computing a route
#[derive(Debug, Error)]
pub enum RoutingError {
    /// HTTP client could not be built or the host was unreachable
    #[error("Routing connection failed: {0}")]
    ConnectionFailed(String),

    /// Upstream answered with an unexpected status
    #[error("Routing request failed: {0}")]
    RequestFailed(String),

    /// Response body was not the expected JSON
    #[error("Routing parse error: {0}")]
    ParseError(String),

    /// Engine found no path between the waypoints
    #[error("No route found: {0}")]
    NoRoute(String),

    /// Engine rejected the request (bad coordinates, profile, ...)
    #[error("Invalid routing query ({code}): {message}")]
    InvalidQuery {
        /// OSRM response code, e.g. "InvalidUrl"
        code: String,
        /// Human-readable message from the engine
        message: String,
    },

    /// Fewer than two waypoints were supplied
    #[error("At least two waypoints are required, got {0}")]
    NotEnoughWaypoints(usize),

    /// Upstream throttled the client
    #[error("Routing rate limit exceeded")]
    RateLimitExceeded,

    /// Request timed out
    #[error("Routing request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoutingError::InvalidQuery {
            code: "InvalidUrl".to_string(),
            message: "URL string malformed".to_string(),
        };
        assert!(err.to_string().contains("InvalidUrl"));
        assert!(err.to_string().contains("malformed"));

        let err = RoutingError::NotEnoughWaypoints(1);
        assert!(err.to_string().contains('1'));
    }
}
