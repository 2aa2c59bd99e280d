//! Transport client
//!
//! Executes request descriptors with bearer attachment, outcome
//! classification, bounded retries, and the single refresh-and-retry cycle
//! on credential expiry. The retry budget belongs to one `send` call; the
//! post-refresh attempt sits outside it (a renewed credential is not a
//! transient fault).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use finboard_common::auth::{CredentialPersistence, RefreshTransport, TokenLifecycleManager};
use finboard_common::resilience::RetryPolicy;
use finboard_domain::{FinboardError, Result};
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::descriptor::RequestDescriptor;
use crate::auth::auth_error_to_domain;
use crate::errors::{classify_status, InfraError};

/// Where the transport obtains, renews, and invalidates credentials.
///
/// The production implementation wraps the token lifecycle manager; tests
/// substitute static sources.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// A token valid for the next request (proactive renewal applied).
    async fn access_token(&self) -> Result<String>;

    /// Force one renewal after the server rejected the current token.
    /// Joins any renewal already in flight.
    async fn renew(&self) -> Result<()>;

    /// Tear the session down after a renewed token was rejected again.
    async fn invalidate(&self);
}

/// [`AccessTokenSource`] backed by the token lifecycle manager.
pub struct ManagedTokenSource<R, P>
where
    R: RefreshTransport + 'static,
    P: CredentialPersistence + 'static,
{
    manager: Arc<TokenLifecycleManager<R, P>>,
}

impl<R, P> ManagedTokenSource<R, P>
where
    R: RefreshTransport + 'static,
    P: CredentialPersistence + 'static,
{
    #[must_use]
    pub fn new(manager: Arc<TokenLifecycleManager<R, P>>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl<R, P> AccessTokenSource for ManagedTokenSource<R, P>
where
    R: RefreshTransport + 'static,
    P: CredentialPersistence + 'static,
{
    async fn access_token(&self) -> Result<String> {
        self.manager.access_token().await.map_err(auth_error_to_domain)
    }

    async fn renew(&self) -> Result<()> {
        self.manager.refresh().await.map(drop).map_err(auth_error_to_domain)
    }

    async fn invalidate(&self) {
        if let Err(error) = self.manager.logout().await {
            warn!(%error, "failed to clear credentials during session teardown");
        }
    }
}

/// HTTP client with credential attachment and retry semantics.
#[derive(Clone)]
pub struct TransportClient {
    client: ReqwestClient,
    auth: Arc<dyn AccessTokenSource>,
    retry: RetryPolicy,
}

impl TransportClient {
    /// Start building a new transport client.
    #[must_use]
    pub fn builder() -> TransportClientBuilder {
        TransportClientBuilder::default()
    }

    /// Execute a descriptor to a raw 2xx response.
    ///
    /// # Errors
    /// A classified [`FinboardError`]; retryable failures have already
    /// exhausted the configured attempts by the time they surface.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<Response> {
        let request_id = Uuid::new_v4();
        let mut attempt: u32 = 0;
        let mut refreshed = false;

        loop {
            match self.execute_once(descriptor, request_id, attempt).await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        debug!(%request_id, %status, "received HTTP response");
                        return Ok(response);
                    }

                    if status == StatusCode::UNAUTHORIZED && descriptor.requires_auth {
                        if refreshed {
                            warn!(%request_id, "renewed access token rejected, ending session");
                            self.auth.invalidate().await;
                            return Err(FinboardError::AuthFailure(
                                "access token rejected after renewal".into(),
                            ));
                        }
                        debug!(%request_id, "access token rejected, requesting renewal");
                        self.auth.renew().await?;
                        refreshed = true;
                        continue;
                    }

                    let error = classify_status(status, truncated_body(response).await);
                    if self.may_retry(descriptor, &error, attempt) {
                        self.backoff(request_id, attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(error);
                }
                Err(error) => {
                    if self.may_retry(descriptor, &error, attempt) {
                        self.backoff(request_id, attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(error);
                }
            }
        }
    }

    /// Execute a descriptor and deserialize the JSON response body.
    ///
    /// # Errors
    /// As [`Self::send`], plus `Internal` for malformed payloads.
    pub async fn send_json<T: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> Result<T> {
        let response = self.send(descriptor).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| FinboardError::Internal(format!("malformed response payload: {err}")))
    }

    /// Execute a descriptor and discard the response body (deletes).
    ///
    /// # Errors
    /// As [`Self::send`].
    pub async fn send_unit(&self, descriptor: &RequestDescriptor) -> Result<()> {
        self.send(descriptor).await.map(drop)
    }

    /// Reachability probe: unauthenticated, single attempt, returns the
    /// round-trip latency.
    ///
    /// # Errors
    /// The classified failure; never triggers renewal or retries.
    pub async fn probe(&self, url: &str) -> Result<Duration> {
        let descriptor = RequestDescriptor::get(url).public().no_retry();
        let started = Instant::now();
        self.send(&descriptor).await?;
        Ok(started.elapsed())
    }

    async fn execute_once(
        &self,
        descriptor: &RequestDescriptor,
        request_id: Uuid,
        attempt: u32,
    ) -> Result<Response> {
        let mut builder = self.client.request(descriptor.method.clone(), &descriptor.url);
        if !descriptor.query.is_empty() {
            builder = builder.query(&descriptor.query);
        }
        if let Some(body) = &descriptor.body {
            builder = builder.json(body);
        }
        if descriptor.requires_auth {
            builder = builder.bearer_auth(self.auth.access_token().await?);
        }

        debug!(
            %request_id,
            attempt = attempt + 1,
            method = %descriptor.method,
            url = %descriptor.url,
            "sending HTTP request"
        );

        builder.send().await.map_err(|err| {
            let infra: InfraError = err.into();
            infra.into()
        })
    }

    fn may_retry(&self, descriptor: &RequestDescriptor, error: &FinboardError, attempt: u32) -> bool {
        descriptor.retry && error.is_retryable() && self.retry.allows_retry(attempt)
    }

    async fn backoff(&self, request_id: Uuid, attempt: u32) {
        let delay = self.retry.delay_for(attempt);
        debug!(%request_id, delay_ms = delay.as_millis() as u64, "retrying after backoff");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

async fn truncated_body(response: Response) -> String {
    const LIMIT: usize = 256;
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > LIMIT {
        body.truncate(LIMIT);
    }
    body
}

/// Builder for [`TransportClient`].
#[derive(Debug)]
pub struct TransportClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for TransportClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), retry: RetryPolicy::default(), user_agent: None }
    }
}

impl TransportClientBuilder {
    /// Per-attempt timeout; a timed-out attempt classifies as retryable.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Finish the build over the given credential source.
    ///
    /// # Errors
    /// `Config` when the underlying HTTP client cannot be constructed.
    pub fn build(self, auth: Arc<dyn AccessTokenSource>) -> Result<TransportClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            FinboardError::from(infra)
        })?;

        Ok(TransportClient { client, auth, retry: self.retry })
    }
}
