//! Error types used throughout the application
//!
//! The taxonomy mirrors how the transport layer classifies outcomes:
//! `Network`/`Server` are transient and retried, `AuthExpired` triggers a
//! single refresh-and-retry cycle, `AuthFailure` ends the session, and the
//! remaining variants are terminal for the call that produced them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Finboard
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum FinboardError {
    /// No response was received (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a 5xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The access token was rejected (401, first occurrence)
    #[error("Access token expired")]
    AuthExpired,

    /// Credential renewal failed or a refreshed token was rejected again;
    /// the session is over and fallback must not mask this
    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    /// The backend answered with a 4xx status other than 401/404
    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    /// The requested resource does not exist (remote 404 or fallback miss)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unclassified failure (malformed payloads, invariant violations)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FinboardError {
    /// Whether the transport layer may retry the operation that produced
    /// this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    /// Whether this error ends the session. Terminal auth errors propagate
    /// through every layer; fallback never masks them.
    #[must_use]
    pub fn is_auth_terminal(&self) -> bool {
        matches!(self, Self::AuthFailure(_))
    }
}

/// Result type alias for Finboard operations
pub type Result<T> = std::result::Result<T, FinboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(FinboardError::Network("connection refused".into()).is_retryable());
        assert!(FinboardError::Server { status: 503, message: "unavailable".into() }
            .is_retryable());

        assert!(!FinboardError::AuthExpired.is_retryable());
        assert!(!FinboardError::AuthFailure("refresh rejected".into()).is_retryable());
        assert!(!FinboardError::Client { status: 422, message: "invalid".into() }.is_retryable());
        assert!(!FinboardError::NotFound("co-0001".into()).is_retryable());
        assert!(!FinboardError::Internal("bad payload".into()).is_retryable());
    }

    #[test]
    fn auth_terminal_classification() {
        assert!(FinboardError::AuthFailure("session ended".into()).is_auth_terminal());
        assert!(!FinboardError::AuthExpired.is_auth_terminal());
        assert!(!FinboardError::Network("offline".into()).is_auth_terminal());
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = FinboardError::Server { status: 502, message: "bad gateway".into() };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Server");
        assert_eq!(json["details"]["status"], 502);

        let round_trip: FinboardError = serde_json::from_value(json).unwrap();
        assert_eq!(round_trip, err);
    }
}
