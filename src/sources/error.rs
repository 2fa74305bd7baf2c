//! Error types for external source adapters.
//!
//! Messages follow the What/Why/Fix pattern used across the project.

use thiserror::Error;

/// Errors raised when an external bibliographic source cannot be used.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The source could not be reached (connect/read failure or timeout).
    #[error("{source_name} is unreachable: {reason}\n  Suggestion: Check your network connection and try again")]
    Unreachable {
        /// Source label (e.g. "dblp")
        source_name: String,
        /// Transport failure description
        reason: String,
    },

    /// The source answered with a non-success HTTP status.
    #[error("{source_name} returned HTTP {status}: {reason}\n  Suggestion: {suggestion}")]
    HttpStatus {
        /// Source label
        source_name: String,
        /// HTTP status code
        status: u16,
        /// Why the request failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The response body did not match the expected format.
    #[error("unexpected {source_name} response format: {reason}\n  Suggestion: The service API may have changed; check for an updated release")]
    InvalidResponse {
        /// Source label
        source_name: String,
        /// Parse failure description
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("cannot initialize {source_name} client: {reason}")]
    ClientInit {
        /// Source label
        source_name: String,
        /// Builder failure description
        reason: String,
    },
}

impl SourceError {
    /// Creates an `Unreachable` error.
    #[must_use]
    pub fn unreachable(source_name: &str, reason: &str) -> Self {
        Self::Unreachable {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `HttpStatus` error with a suggestion chosen from the status code.
    #[must_use]
    pub fn http_status(source_name: &str, status: u16) -> Self {
        let (reason, suggestion) = match status {
            401 | 403 => (
                "access denied",
                "Check the configured API key for this source",
            ),
            404 => (
                "endpoint not found",
                "Check the configured base URL for this source",
            ),
            429 => (
                "rate limit exceeded",
                "Wait a few seconds before retrying",
            ),
            s if s >= 500 => ("service unavailable", "Try again later"),
            _ => ("request rejected", "Check the author name and try again"),
        };
        Self::HttpStatus {
            source_name: source_name.to_string(),
            status,
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates an `InvalidResponse` error.
    #[must_use]
    pub fn invalid_response(source_name: &str, reason: &str) -> Self {
        Self::InvalidResponse {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `ClientInit` error.
    #[must_use]
    pub fn client_init(source_name: &str, reason: &str) -> Self {
        Self::ClientInit {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns the label of the source that failed.
    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            Self::Unreachable { source_name, .. }
            | Self::HttpStatus { source_name, .. }
            | Self::InvalidResponse { source_name, .. }
            | Self::ClientInit { source_name, .. } => source_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_unreachable_message() {
        let err = SourceError::unreachable("dblp", "connection refused");
        let msg = err.to_string();
        assert!(msg.contains("dblp"));
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_source_error_http_status_rate_limit() {
        let err = SourceError::http_status("semantic-scholar", 429);
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limit"));
    }

    #[test]
    fn test_source_error_http_status_server_error() {
        let msg = SourceError::http_status("dblp", 503).to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("unavailable"));
    }

    #[test]
    fn test_source_error_invalid_response_message() {
        let err = SourceError::invalid_response("dblp", "missing field `result`");
        assert!(err.to_string().contains("missing field"));
        assert_eq!(err.source_name(), "dblp");
    }

    #[test]
    fn test_source_error_clone() {
        let err = SourceError::client_init("dblp", "tls backend missing");
        assert_eq!(err.to_string(), err.clone().to_string());
    }
}
