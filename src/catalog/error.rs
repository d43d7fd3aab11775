//! Error types for catalog networking.
//!
//! [`FetchError`] is the transport category: the paginator catches it, logs
//! it and ends pagination with partial results. [`CatalogError`] covers client
//! construction, before any request is made.

use thiserror::Error;

/// Transport-level failure fetching one feed page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The page URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The page URL that timed out.
        url: String,
    },

    /// Non-success HTTP status after redirects.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The page URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The page URL could not be parsed.
    #[error("invalid page URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Classifies a reqwest send/body error.
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }

    /// The URL the failure relates to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::HttpStatus { url, .. }
            | Self::InvalidUrl { url } => url,
        }
    }
}

/// Errors constructing a catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Base URL is malformed or not HTTP(S)
    #[error("invalid catalog base URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidBaseUrl {
        /// The rejected base URL
        url: String,
        /// Why it was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// HTTP client could not be built
    #[error("failed to build HTTP client for the catalog: {source}")]
    ClientBuild {
        /// The underlying builder error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction panicked, even with system proxy lookup skipped
    #[error(
        "HTTP client construction for the catalog panicked while loading proxy settings\n  Suggestion: Check HTTPS_PROXY/HTTP_PROXY or the system proxy configuration"
    )]
    ClientBuildPanicked,
}

impl CatalogError {
    /// Creates an `InvalidBaseUrl` error for a malformed URL.
    #[must_use]
    pub fn malformed_base_url(url: &str, parse_error: &str) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Pass an absolute URL such as https://flibusta.is".to_string(),
        }
    }

    /// Creates an `InvalidBaseUrl` error for a non-web URL scheme.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: format!("scheme '{scheme}' is not supported"),
            suggestion: "Use http:// or https:// URLs".to_string(),
        }
    }
}
