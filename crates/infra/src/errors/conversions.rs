//! Conversions from external infrastructure errors into domain errors.

use finboard_domain::FinboardError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FinboardError);

impl From<InfraError> for FinboardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FinboardError> for InfraError {
    fn from(value: FinboardError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FinboardError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let mapped = if value.is_timeout() || value.is_connect() || value.is_request() {
            // No response arrived; the caller may retry.
            FinboardError::Network(format!("http transport failure: {value}"))
        } else if value.is_decode() {
            FinboardError::Internal(format!("malformed response payload: {value}"))
        } else if value.is_builder() {
            FinboardError::Config(format!("invalid request construction: {value}"))
        } else {
            FinboardError::Internal(format!("http failure: {value}"))
        };
        InfraError(mapped)
    }
}

/* -------------------------------------------------------------------------- */
/* HTTP status → FinboardError */
/* -------------------------------------------------------------------------- */

/// Classify a non-2xx status into the domain taxonomy.
///
/// 401 is `AuthExpired` (the transport decides whether it escalates), 404 is
/// `NotFound` for parity with the fallback layer, remaining 4xx are
/// `Client`, 5xx are `Server`, anything else is `Internal`.
#[must_use]
pub fn classify_status(status: StatusCode, message: String) -> FinboardError {
    if status == StatusCode::UNAUTHORIZED {
        FinboardError::AuthExpired
    } else if status == StatusCode::NOT_FOUND {
        FinboardError::NotFound(message)
    } else if status.is_client_error() {
        FinboardError::Client { status: status.as_u16(), message }
    } else if status.is_server_error() {
        FinboardError::Server { status: status.as_u16(), message }
    } else {
        FinboardError::Internal(format!("unclassified status {status}: {message}"))
    }
}
