//! Request descriptors
//!
//! One immutable descriptor per top-level call. The transport may execute
//! it several times (retries, the post-refresh attempt), so everything
//! needed to rebuild the request lives here rather than in a consumed
//! `reqwest` builder.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use finboard_domain::{FinboardError, Result};

/// An HTTP-shaped request, fixed at construction time.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    /// Attach the bearer token; false for public endpoints
    pub requires_auth: bool,
    /// Apply the retry policy; false for probes
    pub retry: bool,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            query: Vec::new(),
            requires_auth: true,
            retry: true,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    /// `Internal` when the value cannot be serialized.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| FinboardError::Internal(format!("unserializable body: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Mark the request public: no bearer token is attached.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Disable retries: the request runs at most one network attempt
    /// (plus the refresh-and-retry cycle if it requires auth).
    #[must_use]
    pub fn no_retry(mut self) -> Self {
        self.retry = false;
        self
    }
}
