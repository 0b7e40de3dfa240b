//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `QKART_ENDPOINT` - Base URL of the QKart REST backend
//!   (e.g., `https://qkart.example.com/api/v1`)
//!
//! ## Optional
//! - `QKART_SESSION_FILE` - Path of the persisted session file
//!   (default: `.qkart-session.json`)
//! - `QKART_DEBOUNCE_MS` - Search quiet period in milliseconds (default: 500)
//! - `QKART_HTTP_TIMEOUT_SECS` - Per-request HTTP timeout (default: 30)
//! - `QKART_CACHE_TTL_SECS` - Catalog cache TTL (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default search quiet period, matching the reference behavior.
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_SESSION_FILE: &str = ".qkart-session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the QKart backend, without a trailing slash.
    pub endpoint: Url,
    /// Path of the flat JSON file holding the persisted session.
    pub session_file: PathBuf,
    /// Quiet period between the last keystroke and the search request.
    pub debounce: Duration,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// How long cached catalog responses stay fresh.
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `QKART_ENDPOINT` is missing or any variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let endpoint = parse_endpoint(&get_required_env("QKART_ENDPOINT")?)?;
        let session_file =
            PathBuf::from(get_env_or_default("QKART_SESSION_FILE", DEFAULT_SESSION_FILE));
        let debounce = Duration::from_millis(get_parsed_or_default(
            "QKART_DEBOUNCE_MS",
            DEFAULT_DEBOUNCE_MS,
        )?);
        let http_timeout = Duration::from_secs(get_parsed_or_default(
            "QKART_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let cache_ttl = Duration::from_secs(get_parsed_or_default(
            "QKART_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);

        Ok(Self {
            endpoint,
            session_file,
            debounce,
            http_timeout,
            cache_ttl,
        })
    }

    /// Build a configuration for a given endpoint with default tunables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `endpoint` is not a valid URL.
    pub fn for_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        })
    }
}

/// Parse and normalize the backend endpoint.
///
/// A trailing slash is trimmed so path joins stay predictable.
fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar("QKART_ENDPOINT".to_string(), e.to_string()))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable parsed as `u64`, falling back to a default.
fn get_parsed_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_trims_trailing_slash() {
        let url = parse_endpoint("https://qkart.example.com/api/v1/").unwrap();
        assert_eq!(url.as_str(), "https://qkart.example.com/api/v1");
    }

    #[test]
    fn test_parse_endpoint_rejects_garbage() {
        let result = parse_endpoint("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_for_endpoint_defaults() {
        let config = StorefrontConfig::for_endpoint("http://localhost:8082/api/v1").unwrap();
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.session_file, PathBuf::from(".qkart-session.json"));
    }
}
