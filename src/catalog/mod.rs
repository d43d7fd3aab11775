//! Catalog access: configuration, page fetching, pagination and the client.
//!
//! # Architecture
//!
//! - [`CatalogClient`] - Public operations (`search_books`, `search_authors`, `get_author_books`)
//! - [`Paginator`] - Sequential fetch/parse loop with a soft result cap
//! - [`PageFetcher`] - Async trait for fetching one page; [`HttpPageFetcher`] is the reqwest implementation
//! - [`CatalogConfig`] - Base URL, timeouts and User-Agent
//!
//! Transport errors ([`FetchError`]) stop at the paginator. Only
//! [`FeedError`](crate::feed::FeedError) reaches callers of the operations.

mod client;
mod config;
mod error;
mod fetcher;
mod paginator;

pub use client::{CatalogClient, DEFAULT_AUTHOR_SEARCH_LIMIT, DEFAULT_BOOK_LIMIT};
pub use config::{
    CONNECT_TIMEOUT_SECS, CatalogConfig, DEFAULT_BASE_URL, MAX_REDIRECTS, REQUEST_TIMEOUT_SECS,
};
pub use error::{CatalogError, FetchError};
pub use fetcher::{HttpPageFetcher, PageFetcher, QueryParams};
pub use paginator::{PageRequest, Paginator};
