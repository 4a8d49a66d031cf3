//! Client configuration
//!
//! Values come from the environment (a `.env` file is honoured) with
//! defaults suitable for a backend running on localhost.

use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Family tree depth used when the query state carries no usable `limit`
pub const DEFAULT_TREE_LIMIT: u32 = 100;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without trailing slash
    pub backend_url: String,
    pub request_timeout: Duration,
    /// Quiescence window for typeahead inputs (owner, mother, father)
    pub typeahead_debounce: Duration,
    /// Quiescence window for the horse search filter form
    pub search_debounce: Duration,
    /// Number of suggestions requested per typeahead search
    pub typeahead_max_results: i64,
    pub default_tree_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: std::env::var("PEDIGREE_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            request_timeout: Duration::from_secs(
                std::env::var("PEDIGREE_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            typeahead_debounce: Duration::from_millis(200),
            search_debounce: Duration::from_millis(500),
            typeahead_max_results: std::env::var("PEDIGREE_TYPEAHEAD_MAX_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &i64| *n > 0)
                .unwrap_or(5),
            default_tree_limit: DEFAULT_TREE_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Load `.env`, read the environment and validate the result
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::default().validated()
    }

    /// Config pointing at an explicit backend
    pub fn with_backend_url(url: impl Into<String>) -> Result<Self, ConfigError> {
        Self {
            backend_url: url.into(),
            ..Self::default()
        }
        .validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let parsed = Url::parse(&self.backend_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.backend_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.backend_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        self.backend_url = self.backend_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ClientConfig::with_backend_url("http://127.0.0.1:9000/").unwrap();
        assert_eq!(config.backend_url, "http://127.0.0.1:9000");
        assert_eq!(config.typeahead_debounce, Duration::from_millis(200));
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.default_tree_limit, 100);
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::with_backend_url("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::with_backend_url("ftp://example.com"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
