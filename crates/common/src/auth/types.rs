//! Credential and session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access/refresh token pair with its expiry instant.
///
/// Owned exclusively by the [`crate::auth::CredentialStore`]; mutated only
/// by login, refresh, or logout. A missing pair means "unauthenticated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute expiration timestamp (UTC), derived from the issuing
    /// response's TTL
    pub expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Create a pair whose `expires_at` is `expires_in` seconds from now.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
        }
    }

    /// Whether the access token is expired or will expire within
    /// `margin_seconds`. The margin keeps a request from racing an
    /// imminently expiring token.
    #[must_use]
    pub fn is_expired(&self, margin_seconds: i64) -> bool {
        Utc::now() + chrono::Duration::seconds(margin_seconds) >= self.expires_at
    }

    /// Seconds until expiry; negative once expired.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }
}

/// Token endpoint response shape (login and refresh share it).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.refresh_token, response.expires_in)
    }
}

/// Last-known user, persisted next to the token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Read-only view combining the token pair and the current user.
///
/// Derived from the store on demand, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

/// The unit of state the persistence collaborator loads/saves/clears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub tokens: TokenPair,
    pub profile: Option<UserProfile>,
}

/// Credential lifecycle errors.
///
/// `Clone` because a single refresh outcome is shared by every waiter of
/// the in-flight operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token pair is present (never logged in, or session already ended)
    #[error("not authenticated")]
    NotAuthenticated,

    /// The auth server rejected the credentials
    #[error("credentials rejected: {0}")]
    Rejected(String),

    /// The auth server could not be reached
    #[error("auth transport error: {0}")]
    Transport(String),

    /// The persistence collaborator failed
    #[error("credential persistence error: {0}")]
    Persistence(String),
}
