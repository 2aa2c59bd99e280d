//! Credential store
//!
//! Pure state container for the current token pair and user profile. Cheap
//! to clone (shared interior); any number of in-flight requests may read it
//! concurrently, while writes go through the lifecycle manager only and are
//! atomic relative to readers.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::types::{Session, StoredCredentials, TokenPair, UserProfile};

#[derive(Debug, Default)]
struct StoreState {
    tokens: Option<TokenPair>,
    profile: Option<UserProfile>,
}

/// Shared, process-wide credential state.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    state: Arc<RwLock<StoreState>>,
}

impl CredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token pair, if any.
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.state.read().await.tokens.clone()
    }

    /// Current access token, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.state.read().await.tokens.as_ref().map(|t| t.access_token.clone())
    }

    /// Last-known user profile, if any.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.read().await.profile.clone()
    }

    /// Derived session view; `None` unless both a pair and a profile exist.
    pub async fn session(&self) -> Option<Session> {
        let state = self.state.read().await;
        match (&state.tokens, &state.profile) {
            (Some(tokens), Some(profile)) => {
                Some(Session { user: profile.clone(), expires_at: tokens.expires_at })
            }
            _ => None,
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.tokens.is_some()
    }

    /// Install a full credential set (login or startup rehydration).
    pub async fn install(&self, credentials: StoredCredentials) {
        let mut state = self.state.write().await;
        state.tokens = Some(credentials.tokens);
        state.profile = credentials.profile;
    }

    /// Swap in a renewed pair, keeping the profile. The write lock makes
    /// the replacement atomic: readers see the old pair or the new one.
    pub async fn replace_tokens(&self, tokens: TokenPair) {
        self.state.write().await.tokens = Some(tokens);
    }

    /// Drop all credential state (logout, forced or voluntary).
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.tokens = None;
        state.profile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> StoredCredentials {
        StoredCredentials {
            tokens: TokenPair::new("access", "refresh", 3600),
            profile: Some(UserProfile {
                id: "u-1".into(),
                email: "ada@finboard.example".into(),
                name: "Ada".into(),
            }),
        }
    }

    #[tokio::test]
    async fn starts_unauthenticated() {
        let store = CredentialStore::new();
        assert!(!store.is_authenticated().await);
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn install_then_clear() {
        let store = CredentialStore::new();
        store.install(credentials()).await;
        assert!(store.is_authenticated().await);
        assert_eq!(store.access_token().await.as_deref(), Some("access"));

        store.clear().await;
        assert!(!store.is_authenticated().await);
        assert!(store.profile().await.is_none());
    }

    #[tokio::test]
    async fn replace_keeps_profile() {
        let store = CredentialStore::new();
        store.install(credentials()).await;

        store.replace_tokens(TokenPair::new("access2", "refresh2", 3600)).await;
        assert_eq!(store.access_token().await.as_deref(), Some("access2"));
        assert!(store.profile().await.is_some());
    }

    #[tokio::test]
    async fn session_combines_both_sources() {
        let store = CredentialStore::new();
        store.install(credentials()).await;

        let session = store.session().await.unwrap();
        assert_eq!(session.user.name, "Ada");
        assert!(session.expires_at > chrono::Utc::now());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = CredentialStore::new();
        let view = store.clone();
        store.install(credentials()).await;
        assert!(view.is_authenticated().await);
    }
}
