//! HTTP client for the auth endpoints
//!
//! Implements the [`RefreshTransport`] seam over the deployment's token
//! endpoint and carries the login call so the lifecycle is complete:
//! login → use → refresh → logout. Both endpoints are public (no bearer
//! attachment) and never retried: the lifecycle manager decides what a
//! failed renewal means.

use std::time::Duration;

use async_trait::async_trait;
use finboard_common::auth::{AuthError, RefreshTransport, TokenPair, TokenResponse, UserProfile};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the auth server's token endpoints.
pub struct AuthApiClient {
    client: ReqwestClient,
    base_url: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserProfile,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl AuthApiClient {
    /// Create a client against `base_url` (e.g. `https://auth.finboard.example`).
    ///
    /// # Errors
    /// `Transport` when the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|err| AuthError::Transport(format!("http client construction: {err}")))?;
        Ok(Self { client, base_url: trim_base(base_url.into()) })
    }

    /// Authenticate with email/password and return the issued pair plus the
    /// user profile.
    ///
    /// # Errors
    /// `Rejected` on 4xx (wrong credentials), `Transport` otherwise.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(TokenPair, UserProfile), AuthError> {
        debug!(email, "logging in");
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: LoginResponse = response
                .json()
                .await
                .map_err(|err| AuthError::Transport(format!("malformed login response: {err}")))?;
            let pair = TokenPair::new(body.access_token, body.refresh_token, body.expires_in);
            return Ok((pair, body.user));
        }

        Err(classify_auth_status(status, response.text().await.unwrap_or_default()))
    }
}

#[async_trait]
impl RefreshTransport for AuthApiClient {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        debug!("exchanging refresh token");
        let response = self
            .client
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: TokenResponse = response.json().await.map_err(|err| {
                AuthError::Transport(format!("malformed refresh response: {err}"))
            })?;
            return Ok(body.into());
        }

        Err(classify_auth_status(status, response.text().await.unwrap_or_default()))
    }
}

fn classify_auth_status(status: StatusCode, body: String) -> AuthError {
    if status.is_client_error() {
        AuthError::Rejected(if body.is_empty() { status.to_string() } else { body })
    } else {
        AuthError::Transport(format!("auth endpoint answered {status}"))
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(trim_base("https://auth.example//".into()), "https://auth.example");
        assert_eq!(trim_base("https://auth.example".into()), "https://auth.example");
    }

    #[test]
    fn client_errors_mean_rejection() {
        let rejected = classify_auth_status(StatusCode::UNAUTHORIZED, "revoked".into());
        assert_eq!(rejected, AuthError::Rejected("revoked".into()));

        let unreachable = classify_auth_status(StatusCode::BAD_GATEWAY, String::new());
        assert!(matches!(unreachable, AuthError::Transport(_)));
    }
}
