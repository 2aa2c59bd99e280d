//! Configuration structures
//!
//! The whole composition is driven by one [`Config`] value handed to the
//! constructors at startup. There is no ambient or process-wide mode flag:
//! offline/demo behavior is the `offline.prefer_fallback` field of whatever
//! `Config` the caller supplies.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub offline: OfflineConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Per-domain base URLs (configurable per deployment, never hardcoded)
    pub endpoints: EndpointConfig,
    /// Per-attempt request timeout in seconds
    pub request_timeout_seconds: u64,
    /// Retry bounds applied by the transport client
    pub retry: RetryLimits,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            request_timeout_seconds: 30,
            retry: RetryLimits::default(),
        }
    }
}

/// Base URL per domain facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub company: String,
    pub employee: String,
    pub payables: String,
    pub receivables: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            company: "https://api.finboard.example/v1".to_string(),
            employee: "https://api.finboard.example/v1".to_string(),
            payables: "https://api.finboard.example/v1".to_string(),
            receivables: "https://api.finboard.example/v1".to_string(),
        }
    }
}

/// Retry bounds shared by every transport client instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryLimits {
    /// Total attempts per top-level call (initial try + retries)
    pub max_attempts: u32,
    /// First backoff delay in milliseconds
    pub base_delay_ms: u64,
    /// Cap applied to every backoff delay in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryLimits {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay_ms: 200, max_delay_ms: 5_000 }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the auth endpoints (login, refresh)
    pub token_url: String,
    /// Tokens expiring within this margin are treated as already invalid
    pub refresh_margin_seconds: i64,
    /// Where the credential file adapter persists the session; `None`
    /// disables persistence entirely
    pub credentials_path: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: "https://auth.finboard.example".to_string(),
            refresh_margin_seconds: 30,
            credentials_path: None,
        }
    }
}

/// Offline/degraded-mode configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfflineConfig {
    /// Serve the local fallback dataset without attempting the remote
    pub prefer_fallback: bool,
    /// Artificial delay applied to fallback operations, in milliseconds
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_remote_first() {
        let config = Config::default();
        assert!(!config.offline.prefer_fallback);
        assert_eq!(config.api.retry.max_attempts, 3);
        assert!(config.api.retry.base_delay_ms < config.api.retry.max_delay_ms);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api.endpoints.company, config.api.endpoints.company);
        assert_eq!(parsed.auth.refresh_margin_seconds, 30);
    }
}
