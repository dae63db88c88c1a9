//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
///
/// An address that simply has no match is not an error; see
/// [`crate::GeocodingClient::geocode`].
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP client could not be built or the host was unreachable
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Upstream answered with a non-success status
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Response body was not the expected JSON
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address was blank
    #[error("Address must not be empty")]
    EmptyAddress,

    /// Upstream throttled the client
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timed out
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true if repeating the request later could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout | Self::RateLimitExceeded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeocodingError::ParseError("expected array".to_string());
        assert!(err.to_string().contains("expected array"));
        assert!(GeocodingError::Timeout.to_string().contains("timed out"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(GeocodingError::Timeout.is_transient());
        assert!(GeocodingError::RateLimitExceeded.is_transient());
        assert!(GeocodingError::ConnectionFailed("refused".to_string()).is_transient());
        assert!(!GeocodingError::EmptyAddress.is_transient());
        assert!(!GeocodingError::ParseError("x".to_string()).is_transient());
    }
}
