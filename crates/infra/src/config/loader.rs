//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FINBOARD_API_BASE_URL`: Base URL applied to every domain endpoint
//! - `FINBOARD_AUTH_URL`: Auth server base URL (login/refresh)
//! - `FINBOARD_REQUEST_TIMEOUT`: Per-attempt timeout in seconds (optional)
//! - `FINBOARD_MAX_RETRY_ATTEMPTS`: Total attempts per call (optional)
//! - `FINBOARD_RETRY_BASE_DELAY_MS`: First backoff delay (optional)
//! - `FINBOARD_RETRY_MAX_DELAY_MS`: Backoff cap (optional)
//! - `FINBOARD_REFRESH_MARGIN`: Token expiry safety margin in seconds (optional)
//! - `FINBOARD_PREFER_FALLBACK`: Serve local data without trying the remote (optional)
//! - `FINBOARD_CREDENTIALS_PATH`: Credential file location (optional)
//! - `FINBOARD_FALLBACK_LATENCY_MS`: Simulated fallback latency (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./finboard.json` or `./finboard.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use finboard_domain::{
    ApiConfig, AuthConfig, Config, EndpointConfig, FinboardError, OfflineConfig, Result,
    RetryLimits,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `FinboardError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `FINBOARD_API_BASE_URL` and `FINBOARD_AUTH_URL` are required; everything
/// else falls back to the documented defaults.
///
/// # Errors
/// Returns `FinboardError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("FINBOARD_API_BASE_URL")?;
    let auth_url = env_var("FINBOARD_AUTH_URL")?;

    let defaults = Config::default();
    let request_timeout_seconds =
        env_parse("FINBOARD_REQUEST_TIMEOUT", defaults.api.request_timeout_seconds)?;
    let max_attempts =
        env_parse("FINBOARD_MAX_RETRY_ATTEMPTS", defaults.api.retry.max_attempts)?;
    let base_delay_ms =
        env_parse("FINBOARD_RETRY_BASE_DELAY_MS", defaults.api.retry.base_delay_ms)?;
    let max_delay_ms = env_parse("FINBOARD_RETRY_MAX_DELAY_MS", defaults.api.retry.max_delay_ms)?;
    let refresh_margin_seconds =
        env_parse("FINBOARD_REFRESH_MARGIN", defaults.auth.refresh_margin_seconds)?;
    let simulated_latency_ms = env_parse("FINBOARD_FALLBACK_LATENCY_MS", 0u64)?;
    let prefer_fallback = env_bool("FINBOARD_PREFER_FALLBACK", false);
    let credentials_path = std::env::var("FINBOARD_CREDENTIALS_PATH").ok();

    Ok(Config {
        api: ApiConfig {
            endpoints: EndpointConfig {
                company: base_url.clone(),
                employee: base_url.clone(),
                payables: base_url.clone(),
                receivables: base_url,
            },
            request_timeout_seconds,
            retry: RetryLimits { max_attempts, base_delay_ms, max_delay_ms },
        },
        auth: AuthConfig { token_url: auth_url, refresh_margin_seconds, credentials_path },
        offline: OfflineConfig { prefer_fallback, simulated_latency_ms },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `FinboardError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FinboardError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FinboardError::Config("no config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FinboardError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FinboardError::Config(format!("invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FinboardError::Config(format!("invalid JSON format: {e}"))),
        _ => Err(FinboardError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("finboard.json"),
            cwd.join("finboard.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("finboard.json"),
                exe_dir.join("finboard.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| FinboardError::Config(format!("missing required environment variable: {key}")))
}

/// Parse an optional environment variable, using `default` when unset
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| FinboardError::Config(format!("invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
