//! Page fetching seam between the paginator and the network.
//!
//! [`PageFetcher`] is what the paginator calls for every page;
//! [`HttpPageFetcher`] is the reqwest-backed implementation with the catalog
//! networking policy (timeouts, redirects, User-Agent, gzip).

use std::panic::{AssertUnwindSafe, catch_unwind};

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Proxy};
use tracing::{debug, instrument, warn};
use url::Url;

use super::{CatalogConfig, CatalogError, FetchError};

/// Ordered query parameters for a page request.
pub type QueryParams = Vec<(String, String)>;

/// Fetches the raw body of one feed page.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the client can hold a
/// `Box<dyn PageFetcher>` and tests can script page sequences.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GETs `url` with `params` appended to its query string.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on connection failures, timeouts and
    /// non-success statuses.
    async fn fetch_page(&self, url: &str, params: &[(String, String)])
    -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed [`PageFetcher`].
///
/// One client is built per fetcher and reused for every page, taking
/// advantage of connection pooling. Requests are issued one at a time.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Builds a fetcher from catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] when the HTTP client cannot be
    /// constructed, or [`CatalogError::ClientBuildPanicked`] when reqwest
    /// panics in both proxy lookup modes.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = build_client(config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    #[instrument(level = "debug", skip(self, params), fields(url = %url))]
    async fn fetch_page(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Vec<u8>, FetchError> {
        let mut target = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;
        if !params.is_empty() {
            target.query_pairs_mut().extend_pairs(params);
        }

        debug!(request_url = %target, "fetching feed page");
        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(target.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(target.as_str(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(target.as_str(), e))?;
        debug!(bytes = body.len(), "feed page received");
        Ok(body.to_vec())
    }
}

/// Proxy variables read when system proxy lookup is skipped, in lookup order.
const HTTPS_PROXY_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"];
const HTTP_PROXY_VARS: [&str; 4] = ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyLookup {
    System,
    EnvOnly,
}

#[derive(Debug)]
enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

impl BuildClientFailure {
    fn into_catalog_error(self) -> CatalogError {
        match self {
            Self::Panic => CatalogError::ClientBuildPanicked,
            Self::Build(source) => CatalogError::ClientBuild { source },
        }
    }
}

fn build_client(config: &CatalogConfig) -> Result<Client, CatalogError> {
    build_with_fallback(|lookup| {
        catch_build(|| {
            let builder = base_client_builder(config);
            match lookup {
                ProxyLookup::System => builder.build(),
                ProxyLookup::EnvOnly => with_env_proxies(builder.no_proxy()).build(),
            }
        })
    })
}

/// Runs `attempt` with system proxy lookup, retrying env-only when that panics.
fn build_with_fallback(
    mut attempt: impl FnMut(ProxyLookup) -> Result<Client, BuildClientFailure>,
) -> Result<Client, CatalogError> {
    match attempt(ProxyLookup::System) {
        Err(BuildClientFailure::Panic) => {
            // reqwest can panic reading system proxy settings in sandboxes
            warn!("Catalog client could not read system proxy settings; using proxy env vars only");
            attempt(ProxyLookup::EnvOnly).map_err(BuildClientFailure::into_catalog_error)
        }
        other => other.map_err(BuildClientFailure::into_catalog_error),
    }
}

fn catch_build(
    build: impl FnOnce() -> Result<Client, reqwest::Error>,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(build))
        .map_err(|_| BuildClientFailure::Panic)?
        .map_err(BuildClientFailure::Build)
}

fn base_client_builder(config: &CatalogConfig) -> ClientBuilder {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .user_agent(config.user_agent.clone())
}

fn with_env_proxies(builder: ClientBuilder) -> ClientBuilder {
    let https = first_env_value(&HTTPS_PROXY_VARS).and_then(|value| Proxy::https(value).ok());
    let http = first_env_value(&HTTP_PROXY_VARS).and_then(|value| Proxy::http(value).ok());
    [https, http]
        .into_iter()
        .flatten()
        .fold(builder, ClientBuilder::proxy)
}

fn first_env_value(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
