//! Token lifecycle manager
//!
//! Owns login, validation, renewal, and teardown of the credential pair.
//! Renewal is **single-flight**: when several requests hit an expired token
//! in the same tick, exactly one network refresh is issued and every caller
//! awaits that one outcome. The refresh body runs on a spawned task, so it
//! settles (and updates the store) even if individual waiters go away.
//!
//! A failed refresh ends the session: the store and the persisted
//! credentials are cleared before the waiters are resolved, so no caller
//! can keep operating under a stale identity.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::store::CredentialStore;
use super::traits::{CredentialPersistence, RefreshTransport};
use super::types::{AuthError, StoredCredentials, TokenPair, UserProfile};

type SharedRefresh = Shared<BoxFuture<'static, Result<TokenPair, AuthError>>>;

/// The one in-flight renewal, tagged so a settled operation can only
/// remove itself, never a successor.
struct InflightRefresh {
    generation: u64,
    future: SharedRefresh,
}

/// Credential lifecycle orchestrator.
///
/// Generic over the network and storage seams so tests can run it entirely
/// in memory.
pub struct TokenLifecycleManager<R, P>
where
    R: RefreshTransport + 'static,
    P: CredentialPersistence + 'static,
{
    transport: Arc<R>,
    persistence: Arc<P>,
    store: CredentialStore,
    refresh_margin_seconds: i64,
    inflight: Mutex<Option<InflightRefresh>>,
    generation: AtomicU64,
}

impl<R, P> TokenLifecycleManager<R, P>
where
    R: RefreshTransport + 'static,
    P: CredentialPersistence + 'static,
{
    /// Create a manager over fresh (empty) credential state.
    ///
    /// # Arguments
    /// * `transport` - refresh endpoint client
    /// * `persistence` - credential storage collaborator
    /// * `refresh_margin_seconds` - tokens expiring within this margin are
    ///   treated as already invalid
    #[must_use]
    pub fn new(transport: Arc<R>, persistence: Arc<P>, refresh_margin_seconds: i64) -> Self {
        Self {
            transport,
            persistence,
            store: CredentialStore::new(),
            refresh_margin_seconds,
            inflight: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Handle to the shared credential store (cheap clone).
    #[must_use]
    pub fn store(&self) -> CredentialStore {
        self.store.clone()
    }

    /// Rehydrate the store from persistence. Call once at startup.
    ///
    /// Returns `true` when a stored session was found.
    ///
    /// # Errors
    /// Propagates persistence failures; an empty store is not an error.
    pub async fn initialize(&self) -> Result<bool, AuthError> {
        match self.persistence.load().await? {
            Some(credentials) => {
                self.store.install(credentials).await;
                info!("credential store rehydrated from persistence");
                Ok(true)
            }
            None => {
                debug!("no persisted credentials found");
                Ok(false)
            }
        }
    }

    /// Install a fresh session (after a successful login call).
    ///
    /// # Errors
    /// Propagates persistence failures; the in-memory session is installed
    /// either way.
    pub async fn login(
        &self,
        tokens: TokenPair,
        profile: Option<UserProfile>,
    ) -> Result<(), AuthError> {
        let credentials = StoredCredentials { tokens, profile };
        self.store.install(credentials.clone()).await;
        self.persistence.save(&credentials).await?;
        info!("session installed");
        Ok(())
    }

    /// End the session voluntarily.
    ///
    /// # Errors
    /// Propagates persistence failures; the in-memory state is cleared
    /// either way.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().await;
        self.persistence.clear().await?;
        info!("session cleared");
        Ok(())
    }

    /// Whether a pair is usable for a request right now, with the safety
    /// margin applied.
    #[must_use]
    pub fn is_valid(&self, tokens: &TokenPair) -> bool {
        !tokens.is_expired(self.refresh_margin_seconds)
    }

    /// A valid access token, renewing proactively when the current one is
    /// within the expiry margin.
    ///
    /// # Errors
    /// `NotAuthenticated` without a session; refresh errors as in
    /// [`Self::refresh`].
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let tokens = self.store.tokens().await.ok_or(AuthError::NotAuthenticated)?;
        if self.is_valid(&tokens) {
            return Ok(tokens.access_token);
        }
        debug!(
            seconds_until_expiry = tokens.seconds_until_expiry(),
            "access token within expiry margin, renewing"
        );
        Ok(self.refresh().await?.access_token)
    }

    /// Renew the token pair, sharing any refresh already in flight.
    ///
    /// Concurrent callers all receive the outcome of one network call. On
    /// success the store is updated before any waiter resumes; on failure
    /// the session is torn down (store and persistence cleared) and every
    /// waiter sees the same error.
    ///
    /// # Errors
    /// `NotAuthenticated` without a session; `Rejected`/`Transport` when
    /// renewal fails (the session is over in both cases).
    pub async fn refresh(&self) -> Result<TokenPair, AuthError> {
        let (generation, future) = {
            let mut slot = self.inflight.lock().await;
            if let Some(inflight) = slot.as_ref() {
                debug!("joining in-flight credential refresh");
                (inflight.generation, inflight.future.clone())
            } else {
                let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                let task = tokio::spawn(run_refresh(
                    self.store.clone(),
                    Arc::clone(&self.transport),
                    Arc::clone(&self.persistence),
                ));
                let future: SharedRefresh = async move {
                    match task.await {
                        Ok(outcome) => outcome,
                        Err(join_error) => {
                            Err(AuthError::Transport(format!("refresh task failed: {join_error}")))
                        }
                    }
                }
                .boxed()
                .shared();
                *slot = Some(InflightRefresh { generation, future: future.clone() });
                (generation, future)
            }
        };

        let outcome = future.await;

        // Retire the slot only if it still holds this operation; a newer
        // refresh may already occupy it.
        let mut slot = self.inflight.lock().await;
        if slot.as_ref().is_some_and(|inflight| inflight.generation == generation) {
            *slot = None;
        }
        drop(slot);

        outcome
    }
}

/// The refresh body, detached from any single caller.
async fn run_refresh<R, P>(
    store: CredentialStore,
    transport: Arc<R>,
    persistence: Arc<P>,
) -> Result<TokenPair, AuthError>
where
    R: RefreshTransport,
    P: CredentialPersistence,
{
    let Some(current) = store.tokens().await else {
        return Err(AuthError::NotAuthenticated);
    };

    match transport.refresh(&current.refresh_token).await {
        Ok(renewed) => {
            let profile = store.profile().await;
            store.replace_tokens(renewed.clone()).await;
            let stored = StoredCredentials { tokens: renewed.clone(), profile };
            if let Err(error) = persistence.save(&stored).await {
                // The in-memory session stays valid; only survival across
                // restarts is affected.
                warn!(%error, "failed to persist renewed credentials");
            }
            info!("access token renewed");
            Ok(renewed)
        }
        Err(error) => {
            store.clear().await;
            if let Err(persist_error) = persistence.clear().await {
                warn!(error = %persist_error, "failed to clear persisted credentials");
            }
            warn!(%error, "credential refresh failed, session ended");
            Err(error)
        }
    }
}
