//! Public catalog operations.

use tracing::instrument;
use url::Url;

use crate::feed::FeedError;
use crate::model::{Author, Book};

use super::{CatalogConfig, CatalogError, HttpPageFetcher, PageFetcher, PageRequest, Paginator};

/// Default soft cap for book searches and author listings.
pub const DEFAULT_BOOK_LIMIT: usize = 100;

/// Default soft cap for author searches.
pub const DEFAULT_AUTHOR_SEARCH_LIMIT: usize = 20;

/// Read-only client for an OPDS catalog.
///
/// Each operation configures the paginator with a starting endpoint and a
/// record kind; there is no other logic here.
///
/// # Example
///
/// ```no_run
/// use flibusta_core::{CatalogClient, DEFAULT_BOOK_LIMIT};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CatalogClient::new()?;
/// let books = client.search_books("Master and Margarita", DEFAULT_BOOK_LIMIT).await?;
/// for book in &books {
///     println!("{} - {}", book.title, book.author_names());
/// }
/// # Ok(())
/// # }
/// ```
pub struct CatalogClient {
    base_url: Url,
    fetcher: Box<dyn PageFetcher>,
}

impl CatalogClient {
    /// Creates a client for the default catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_config(&CatalogConfig::default())
    }

    /// Creates a client for another catalog base URL (a mirror, or a mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the URL is invalid or HTTP client
    /// construction fails.
    pub fn with_base_url(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_config(&CatalogConfig::for_base_url(base_url)?)
    }

    /// Creates a client from full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if HTTP client construction fails.
    pub fn with_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let fetcher = HttpPageFetcher::new(config)?;
        Ok(Self::with_fetcher(config.base_url.clone(), fetcher))
    }

    /// Creates a client over any [`PageFetcher`].
    #[must_use]
    pub fn with_fetcher(base_url: Url, fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            base_url,
            fetcher: Box::new(fetcher),
        }
    }

    /// The catalog base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Searches books by title or author text.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when a page cannot be parsed. Network failures
    /// end the search early and return the books gathered so far.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn search_books(&self, query: &str, limit: usize) -> Result<Vec<Book>, FeedError> {
        self.paginator()
            .collect(self.search_request("books", query), limit)
            .await
    }

    /// Searches authors by name.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when an author entry has no valid book count.
    /// Network failures end the search early and return the authors
    /// gathered so far.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn search_authors(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Author>, FeedError> {
        self.paginator()
            .collect(self.search_request("authors", query), limit)
            .await
    }

    /// Lists all books of one author.
    ///
    /// # Errors
    ///
    /// Same as [`search_books`](Self::search_books).
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn get_author_books(
        &self,
        author_id: &str,
        limit: usize,
    ) -> Result<Vec<Book>, FeedError> {
        let url = self.opds_url(&format!(
            "author/{}/alphabet",
            urlencoding::encode(author_id)
        ));
        self.paginator()
            .collect(PageRequest::new(url, Vec::new()), limit)
            .await
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(self.fetcher.as_ref(), &self.base_url)
    }

    fn search_request(&self, search_type: &str, query: &str) -> PageRequest {
        PageRequest::new(
            self.opds_url("search"),
            vec![
                ("searchType".to_string(), search_type.to_string()),
                ("searchTerm".to_string(), query.to_string()),
            ],
        )
    }

    /// OPDS endpoint under the base URL, e.g. `https://flibusta.is/opds/search`.
    fn opds_url(&self, path: &str) -> String {
        format!("{}/opds/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
