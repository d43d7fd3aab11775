//! Catalog client configuration.

use std::time::Duration;

use url::Url;

use crate::user_agent;

use super::CatalogError;

/// Default catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://flibusta.is";

/// Default total request timeout (30 seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default maximum redirect hops per request.
pub const MAX_REDIRECTS: usize = 10;

/// Settings for a [`CatalogClient`](super::CatalogClient).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog base; OPDS endpoints and relative feed hrefs resolve against it.
    pub base_url: Url,
    /// Total timeout for a single page request.
    pub timeout: Duration,
    /// Connect timeout for a single page request.
    pub connect_timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Redirect hops followed before a request fails.
    pub max_redirects: usize,
}

impl CatalogConfig {
    /// Builds a default configuration pointing at another catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute HTTP(S) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Overrides the total request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CatalogConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is a valid URL"),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            user_agent: user_agent::default_catalog_user_agent(),
            max_redirects: MAX_REDIRECTS,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    let url = Url::parse(raw.trim())
        .map_err(|error| CatalogError::malformed_base_url(raw, &error.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(CatalogError::unsupported_scheme(raw, scheme)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url.as_str(), "https://flibusta.is/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("flibusta-search/"));
    }

    #[test]
    fn test_for_base_url_accepts_http_mirror() {
        let config = CatalogConfig::for_base_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_for_base_url_rejects_relative() {
        let err = CatalogConfig::for_base_url("flibusta.is").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_for_base_url_rejects_non_web_scheme() {
        let err = CatalogConfig::for_base_url("file:///tmp/catalog").unwrap_err();
        assert!(err.to_string().contains("scheme 'file'"));
    }

    #[test]
    fn test_with_timeout() {
        let config = CatalogConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
