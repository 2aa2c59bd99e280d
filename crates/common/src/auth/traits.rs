//! Seams for the credential lifecycle
//!
//! Both collaborators are external to this crate: the refresh transport is
//! an HTTP call implemented in infra, and persistence is whatever key-value
//! store the surrounding application provides. The traits keep the
//! lifecycle logic testable with in-memory doubles.

use async_trait::async_trait;

use super::types::{AuthError, StoredCredentials, TokenPair};

/// Network seam for credential renewal.
#[async_trait]
pub trait RefreshTransport: Send + Sync {
    /// Exchange a refresh token for a new pair.
    ///
    /// # Errors
    /// `Rejected` when the server refuses the token, `Transport` when it
    /// cannot be reached.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}

/// Storage seam for session survival across restarts.
///
/// The store holds the token pair and the last-known user profile; it is
/// rehydrated at startup and cleared on any logout.
#[async_trait]
pub trait CredentialPersistence: Send + Sync {
    /// Load previously saved credentials, `None` when nothing is stored.
    async fn load(&self) -> Result<Option<StoredCredentials>, AuthError>;

    /// Persist the current credentials, replacing any previous value.
    async fn save(&self, credentials: &StoredCredentials) -> Result<(), AuthError>;

    /// Remove persisted credentials; succeeds when nothing is stored.
    async fn clear(&self) -> Result<(), AuthError>;
}
