//! Sequential walk over a multi-page feed.
//!
//! The loop state is `(next request, accumulated records)`. Each iteration
//! fetches one page, parses it, and derives the next request from the page's
//! `rel="next"` link. The walk stops when there is no next link, when the
//! accumulated count reaches the limit (checked between pages only, so the
//! last page may overshoot), or when a page fetch fails.
//!
//! Error handling is asymmetric: a [`FetchError`](super::FetchError) ends the
//! walk and returns what was gathered so far, while a [`FeedError`] from the
//! parser propagates to the caller.

use tracing::{debug, warn};
use url::Url;

use crate::feed::{FeedError, FeedRecord};

use super::{PageFetcher, QueryParams};

/// Marker of an already-paginated URL.
const PAGE_NUMBER_MARKER: &str = "pageNumber=";

/// URL plus separately tracked query parameters for one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub params: QueryParams,
}

impl PageRequest {
    /// Creates a request from a URL and query parameters.
    #[must_use]
    pub fn new(url: impl Into<String>, params: QueryParams) -> Self {
        Self {
            url: url.into(),
            params,
        }
    }

    /// Derives the follow-up request from an absolute next-page URL.
    ///
    /// The path is rejoined against `base_url` and the query string is
    /// carried as parameters. Pairs with empty values are dropped and a
    /// repeated key keeps its first position with the last value.
    #[must_use]
    pub fn continuation(base_url: &Url, next_url: &str) -> Option<Self> {
        let next = Url::parse(next_url).ok()?;
        let url = base_url.join(next.path()).ok()?;

        let mut params: QueryParams = Vec::new();
        for (key, value) in next.query_pairs() {
            if value.is_empty() {
                continue;
            }
            if let Some(existing) = params.iter_mut().find(|(k, _)| *k == key) {
                existing.1 = value.into_owned();
            } else {
                params.push((key.into_owned(), value.into_owned()));
            }
        }

        Some(Self::new(url, params))
    }
}

/// Drives repeated fetch-and-parse cycles for one record kind.
pub struct Paginator<'a> {
    fetcher: &'a dyn PageFetcher,
    base_url: &'a Url,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator over `fetcher`, resolving continuations against `base_url`.
    #[must_use]
    pub fn new(fetcher: &'a dyn PageFetcher, base_url: &'a Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Collects records starting at `start` until a stop condition is hit.
    ///
    /// `limit` is a soft cap checked before each fetch; the result is not
    /// trimmed to it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when a fetched page cannot be turned into
    /// records. Transport failures are logged and never returned.
    pub async fn collect<R: FeedRecord>(
        &self,
        start: PageRequest,
        limit: usize,
    ) -> Result<Vec<R>, FeedError> {
        let mut records: Vec<R> = Vec::new();
        let mut next = Some(start);
        let mut pages = 0_usize;

        while let Some(mut request) = next.take() {
            if records.len() >= limit {
                break;
            }
            if request.url.contains(PAGE_NUMBER_MARKER) {
                request.params.clear();
            }

            let body = match self.fetcher.fetch_page(&request.url, &request.params).await {
                Ok(body) => body,
                Err(error) => {
                    warn!(
                        kind = R::KIND,
                        url = %error.url(),
                        error = %error,
                        collected = records.len(),
                        "Error fetching {}; returning partial results",
                        R::KIND
                    );
                    break;
                }
            };

            let page = R::parse_page(&body, self.base_url)?;
            pages += 1;
            debug!(
                kind = R::KIND,
                page = pages,
                page_records = page.records.len(),
                has_next = page.next_url.is_some(),
                "parsed feed page"
            );
            records.extend(page.records);

            next = page
                .next_url
                .and_then(|next_url| PageRequest::continuation(self.base_url, &next_url));
        }

        debug!(kind = R::KIND, pages, total = records.len(), "pagination finished");
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::catalog::FetchError;
    use crate::model::Book;

    /// Serves canned bodies in order and records every request.
    struct Scripted {
        pages: Mutex<Vec<Result<Vec<u8>, FetchError>>>,
        seen: Mutex<Vec<PageRequest>>,
    }

    impl Scripted {
        fn new(pages: Vec<Result<Vec<u8>, FetchError>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for Scripted {
        async fn fetch_page(
            &self,
            url: &str,
            params: &[(String, String)],
        ) -> Result<Vec<u8>, FetchError> {
            self.seen
                .lock()
                .unwrap()
                .push(PageRequest::new(url, params.to_vec()));
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Err(FetchError::http_status(url, 404));
            }
            pages.remove(0)
        }
    }

    fn page(entries: usize, next: Option<&str>) -> Result<Vec<u8>, FetchError> {
        let link = next
            .map(|href| format!(r#"<link rel="next" href="{href}"/>"#))
            .unwrap_or_default();
        let body = "<entry><title>B</title></entry>".repeat(entries);
        Ok(format!("<feed>{link}{body}</feed>").into_bytes())
    }

    fn base() -> Url {
        Url::parse("https://flibusta.is").unwrap()
    }

    #[test]
    fn test_continuation_splits_path_and_query() {
        let request = PageRequest::continuation(
            &base(),
            "https://flibusta.is/opds/search?searchType=books&searchTerm=war&pageNumber=2",
        )
        .unwrap();
        assert_eq!(request.url, "https://flibusta.is/opds/search");
        assert_eq!(
            request.params,
            vec![
                ("searchType".to_string(), "books".to_string()),
                ("searchTerm".to_string(), "war".to_string()),
                ("pageNumber".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_continuation_rejoins_path_on_base_host() {
        let request =
            PageRequest::continuation(&base(), "http://mirror.example/opds/new/1?x=&y=1&y=2")
                .unwrap();
        assert_eq!(request.url, "https://flibusta.is/opds/new/1");
        assert_eq!(request.params, vec![("y".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn test_stops_without_next_link() {
        let fetcher = Scripted::new(vec![page(3, None), page(3, None)]);
        let base = base();
        let books: Vec<Book> = Paginator::new(&fetcher, &base)
            .collect(PageRequest::new("https://flibusta.is/opds/search", Vec::new()), 100)
            .await
            .unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(fetcher.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_limit_fetches_nothing() {
        let fetcher = Scripted::new(vec![page(3, None)]);
        let base = base();
        let books: Vec<Book> = Paginator::new(&fetcher, &base)
            .collect(PageRequest::new("https://flibusta.is/opds/search", Vec::new()), 0)
            .await
            .unwrap();
        assert!(books.is_empty());
        assert!(fetcher.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_paginated_start_url_drops_params() {
        let fetcher = Scripted::new(vec![page(1, None)]);
        let base = base();
        let start = PageRequest::new(
            "https://flibusta.is/opds/search?pageNumber=3",
            vec![("searchTerm".to_string(), "stale".to_string())],
        );
        let _: Vec<Book> = Paginator::new(&fetcher, &base)
            .collect(start, 10)
            .await
            .unwrap();
        assert!(fetcher.seen.lock().unwrap()[0].params.is_empty());
    }

    #[tokio::test]
    async fn test_next_request_carries_query_as_params() {
        let fetcher = Scripted::new(vec![
            page(1, Some("/opds/search?searchTerm=war&pageNumber=1")),
            page(1, None),
        ]);
        let base = base();
        let _: Vec<Book> = Paginator::new(&fetcher, &base)
            .collect(PageRequest::new("https://flibusta.is/opds/search", Vec::new()), 10)
            .await
            .unwrap();
        let seen = fetcher.seen.lock().unwrap();
        assert_eq!(seen[1].url, "https://flibusta.is/opds/search");
        assert_eq!(
            seen[1].params,
            vec![
                ("searchTerm".to_string(), "war".to_string()),
                ("pageNumber".to_string(), "1".to_string()),
            ]
        );
    }
}
