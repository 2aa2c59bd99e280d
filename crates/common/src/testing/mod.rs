//! Test support
//!
//! In-memory doubles for the auth seams. Compiled unconditionally so
//! downstream crates can use them from their own dev-dependencies; nothing
//! here performs I/O.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::auth::{
    AuthError, CredentialPersistence, RefreshTransport, StoredCredentials, TokenPair,
};

/// In-memory [`CredentialPersistence`] double.
#[derive(Debug, Default)]
pub struct MemoryCredentialPersistence {
    state: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at what is currently persisted.
    pub async fn stored(&self) -> Option<StoredCredentials> {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl CredentialPersistence for MemoryCredentialPersistence {
    async fn load(&self) -> Result<Option<StoredCredentials>, AuthError> {
        Ok(self.state.lock().await.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<(), AuthError> {
        *self.state.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        *self.state.lock().await = None;
        Ok(())
    }
}

/// Scripted [`RefreshTransport`] double.
///
/// Pops queued outcomes in order and repeats the final one once the queue
/// is exhausted; counts every call so tests can assert the single-flight
/// property. An optional artificial delay widens the concurrency window.
pub struct ScriptedRefreshTransport {
    script: Mutex<VecDeque<Result<TokenPair, AuthError>>>,
    fallback: Result<TokenPair, AuthError>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedRefreshTransport {
    /// Every call succeeds with a pair carrying `access_token`.
    #[must_use]
    pub fn always_ok(access_token: &str, expires_in: i64) -> Self {
        Self::repeating(Ok(TokenPair::new(access_token, "refresh-renewed", expires_in)))
    }

    /// Every call is rejected with `reason`.
    #[must_use]
    pub fn always_rejected(reason: &str) -> Self {
        Self::repeating(Err(AuthError::Rejected(reason.to_string())))
    }

    /// Every call fails as unreachable.
    #[must_use]
    pub fn always_unreachable(message: &str) -> Self {
        Self::repeating(Err(AuthError::Transport(message.to_string())))
    }

    /// Play `script` in order, then repeat `fallback`.
    #[must_use]
    pub fn scripted(
        script: Vec<Result<TokenPair, AuthError>>,
        fallback: Result<TokenPair, AuthError>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    fn repeating(outcome: Result<TokenPair, AuthError>) -> Self {
        Self::scripted(Vec::new(), outcome)
    }

    /// Delay every call by `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many refresh calls reached this transport.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefreshTransport for ScriptedRefreshTransport {
    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripted = self.script.lock().await.pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_outcomes_play_in_order() {
        let transport = ScriptedRefreshTransport::scripted(
            vec![Err(AuthError::Transport("blip".into()))],
            Ok(TokenPair::new("a2", "r2", 60)),
        );

        assert!(transport.refresh("r1").await.is_err());
        assert!(transport.refresh("r1").await.is_ok());
        assert!(transport.refresh("r1").await.is_ok());
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn memory_persistence_round_trips() {
        let persistence = MemoryCredentialPersistence::new();
        assert!(persistence.load().await.unwrap().is_none());

        let stored =
            StoredCredentials { tokens: TokenPair::new("a", "r", 60), profile: None };
        persistence.save(&stored).await.unwrap();
        assert!(persistence.load().await.unwrap().is_some());

        persistence.clear().await.unwrap();
        assert!(persistence.load().await.unwrap().is_none());
    }
}
