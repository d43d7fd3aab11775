//! Feed entry parser.
//!
//! Converts one raw OPDS document into `(records, next page URL)`. The parser
//! has no network or pagination awareness; it runs in one of two modes:
//!
//! - [`parse_books`] - book search results and author listings
//! - [`parse_authors`] - author search results
//!
//! Every href handed to callers is resolved against the catalog base URL,
//! except author links inside book entries, which are kept as given.
//!
//! # Example
//!
//! ```
//! use flibusta_core::feed::parse_books;
//! use url::Url;
//!
//! let base = Url::parse("https://flibusta.is").unwrap();
//! let body = br#"<feed xmlns="http://www.w3.org/2005/Atom">
//!   <link rel="next" href="/opds/search?pageNumber=1"/>
//!   <entry>
//!     <title>Master and Margarita</title>
//!     <link href="/b/42/download" rel="http://opds-spec.org/acquisition" type="application/octet-stream"/>
//!   </entry>
//! </feed>"#;
//!
//! let page = parse_books(body, &base);
//! assert_eq!(page.records[0].download_links["pdf"], "https://flibusta.is/b/42/download");
//! assert_eq!(page.next_url.as_deref(), Some("https://flibusta.is/opds/search?pageNumber=1"));
//! ```

mod authors;
mod books;
mod document;
mod error;
pub mod heuristics;

pub use authors::parse_authors;
pub use books::parse_books;
pub use error::FeedError;

use url::Url;

use crate::model::{Author, Book};

/// Records extracted from one feed page plus the absolute next-page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage<T> {
    /// Records in feed order.
    pub records: Vec<T>,
    /// First feed-level `rel="next"` link, resolved.
    pub next_url: Option<String>,
}

/// A record kind the paginator can accumulate.
pub trait FeedRecord: Sized + Send {
    /// Plural label used in log messages ("books", "authors").
    const KIND: &'static str;

    /// Parses one page of this record kind.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] for data errors that must reach the caller.
    fn parse_page(body: &[u8], base_url: &Url) -> Result<FeedPage<Self>, FeedError>;
}

impl FeedRecord for Book {
    const KIND: &'static str = "books";

    fn parse_page(body: &[u8], base_url: &Url) -> Result<FeedPage<Self>, FeedError> {
        Ok(parse_books(body, base_url))
    }
}

impl FeedRecord for Author {
    const KIND: &'static str = "authors";

    fn parse_page(body: &[u8], base_url: &Url) -> Result<FeedPage<Self>, FeedError> {
        parse_authors(body, base_url)
    }
}
