//! Client configuration
//!
//! On the server, load with `Config::from_env()` after calling
//! `dotenvy::dotenv()`. The browser bundle has no environment, so it uses the
//! `API_BASE_URL` baked in at compile time, or the default.

use std::time::Duration;

/// Base URL of the blog API when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Request timeout when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL every API path is joined onto
    /// Example: https://blog.example.com/api
    pub api_base_url: String,

    /// Timeout applied by transports that support one
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `API_BASE_URL`: base URL of the blog API
    /// - `API_TIMEOUT_SECS`: request timeout in seconds
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("API_BASE_URL").ok(),
            std::env::var("API_TIMEOUT_SECS").ok(),
        )
    }

    /// Configuration compiled into the browser bundle
    pub fn for_browser() -> Self {
        Self::from_values(option_env!("API_BASE_URL").map(str::to_string), None)
    }

    fn from_values(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let api_base_url = base_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout = timeout_secs
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout),
        }
    }

    /// Whether the default API location is in use
    pub fn is_default_api(&self) -> bool {
        self.api_base_url == DEFAULT_API_BASE_URL
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Config Struct Tests (no env var dependencies - thread safe)
    // ========================================================================

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.is_default_api());
    }

    #[test]
    fn test_from_values_with_all_fields() {
        let config = Config::from_values(
            Some("https://blog.example.com/api".to_string()),
            Some("30".to_string()),
        );

        assert_eq!(config.api_base_url, "https://blog.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.is_default_api());
    }

    #[test]
    fn test_from_values_with_no_fields() {
        let config = Config::from_values(None, None);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_values_empty_url_falls_back() {
        let config = Config::from_values(Some("   ".to_string()), None);

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_values_invalid_timeout_falls_back() {
        let garbage = Config::from_values(None, Some("soon".to_string()));
        let zero = Config::from_values(None, Some("0".to_string()));

        assert_eq!(garbage.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(zero.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Actual values depend on environment, so we don't assert specific values
        let config = Config::from_env();

        assert!(!config.api_base_url.is_empty());
        assert!(config.request_timeout.as_secs() > 0);
    }

    #[test]
    fn test_config_debug() {
        let config = Config::new("http://localhost:9000");

        let debug_str = format!("{:?}", config);

        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("api_base_url"));
        assert!(debug_str.contains("http://localhost:9000"));
    }
}
