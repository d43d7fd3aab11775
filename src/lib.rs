//! Flibusta Core Library
//!
//! This library provides the catalog side of the `flibusta` search tool:
//! it walks a paginated OPDS feed, extracts books and authors from loosely
//! typed entries, and hands back a stable record model.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`model`] - Normalized `Author` and `Book` records
//! - [`feed`] - Feed entry parser (raw OPDS documents into records)
//! - [`catalog`] - HTTP page fetcher, paginator and catalog client
//!
//! Data flows one way: query -> paginator -> entry parser -> records.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod feed;
pub mod model;
mod user_agent;

// Re-export commonly used types
pub use catalog::{
    CatalogClient, CatalogConfig, CatalogError, DEFAULT_AUTHOR_SEARCH_LIMIT, DEFAULT_BASE_URL,
    DEFAULT_BOOK_LIMIT, FetchError, HttpPageFetcher, PageFetcher, PageRequest, Paginator,
    QueryParams,
};
pub use feed::{FeedError, FeedPage, FeedRecord, parse_authors, parse_books};
pub use model::{Author, Book, UNKNOWN_TITLE};
