//! Auth endpoint integration
//!
//! [`AuthApiClient`] talks to the token endpoints (login, refresh) with its
//! own plain HTTP client: credential renewal must never recurse into the
//! authenticated transport it unblocks.

pub mod refresh;

pub use refresh::AuthApiClient;

use finboard_common::auth::AuthError;
use finboard_domain::FinboardError;

/// Map credential lifecycle errors into the domain taxonomy.
///
/// Every failed renewal ends the session, so lifecycle errors surface as
/// `AuthFailure` — the one error fallback never masks. Persistence trouble
/// is infrastructure, not identity, and maps to `Internal`.
#[must_use]
pub fn auth_error_to_domain(error: AuthError) -> FinboardError {
    match error {
        AuthError::NotAuthenticated => FinboardError::AuthFailure("not authenticated".into()),
        AuthError::Rejected(message) => FinboardError::AuthFailure(message),
        AuthError::Transport(message) => {
            FinboardError::AuthFailure(format!("credential renewal failed: {message}"))
        }
        AuthError::Persistence(message) => FinboardError::Internal(message),
    }
}
