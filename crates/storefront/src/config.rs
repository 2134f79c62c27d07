//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `JOKROUP_API_URL` - Backend base URL (default: `http://127.0.0.1:8000`)
//! - `JOKROUP_SESSION_PATH` - File backing local session storage
//!   (default: `.jokroup/session.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default location of the persisted session.
pub const DEFAULT_SESSION_PATH: &str = ".jokroup/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend base URL, always ending in `/`
    pub api_url: Url,
    /// File backing local session storage
    pub session_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
}

impl StorefrontConfig {
    /// Build a configuration for an explicit backend, without Sentry.
    #[must_use]
    pub fn new(api_url: Url, session_path: impl Into<PathBuf>) -> Self {
        Self {
            api_url: with_trailing_slash(api_url),
            session_path: session_path.into(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("JOKROUP_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("JOKROUP_API_URL".to_string(), e))?;
        let session_path = PathBuf::from(get_env_or_default(
            "JOKROUP_SESSION_PATH",
            DEFAULT_SESSION_PATH,
        ));
        let sentry_sample_rate = parse_sample_rate(&get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"))
            .map_err(|e| ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e))?;

        Ok(Self {
            api_url,
            session_path,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Base URL for static assets such as product images.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL cannot be a base (e.g. `data:` URLs).
    pub fn static_url(&self) -> Result<Url, url::ParseError> {
        self.api_url.join("static/")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and normalize the backend base URL.
///
/// Only `http` and `https` are accepted. A trailing slash is added so that
/// relative endpoint paths join onto any path prefix.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(with_trailing_slash(url))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn parse_sample_rate(raw: &str) -> Result<f32, String> {
    let rate = raw.trim().parse::<f32>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("must be between 0.0 and 1.0 (got {rate})"))
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_adds_trailing_slash() {
        let url = parse_api_url("http://127.0.0.1:8000").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");

        let url = parse_api_url("https://shop.example.com/backend").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/backend/");
        assert_eq!(
            url.join("api/v1/product/list").unwrap().as_str(),
            "https://shop.example.com/backend/api/v1/product/list"
        );
    }

    #[test]
    fn test_parse_api_url_rejects_bad_input() {
        assert!(parse_api_url("not a url").is_err());
        assert!(parse_api_url("ftp://files.example.com").is_err());
    }

    #[test]
    fn test_parse_sample_rate() {
        assert!((parse_sample_rate("0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_sample_rate("1.5").is_err());
        assert!(parse_sample_rate("often").is_err());
    }

    #[test]
    fn test_static_url() {
        let config = StorefrontConfig::new(
            Url::parse("http://localhost:8000").unwrap(),
            "/tmp/session.json",
        );
        assert_eq!(
            config.static_url().unwrap().as_str(),
            "http://localhost:8000/static/"
        );
    }
}
