//! Normalized catalog records.
//!
//! [`Author`] and [`Book`] are value records built by the feed entry parser
//! from a single feed entry. They are never mutated after construction and
//! carry no identity beyond structural equality; duplicates across pages are
//! kept as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder title used when a book entry has no `<title>`.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// An author as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable catalog identifier (last path segment of the author link).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Link to the author's page.
    ///
    /// Absolute for author search results; the raw feed href when the author
    /// was taken from a book entry.
    pub link: String,
    /// Number of books, `0` when unknown at parse time.
    pub number_of_books: u32,
}

/// A book offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title, or [`UNKNOWN_TITLE`] when the feed omits it.
    pub title: String,
    /// Authors in feed order.
    pub authors: Vec<Author>,
    /// Opaque entry identifier as given by the feed.
    pub book_id: String,
    /// Format label (e.g. `fb2`, `epub`, `pdf`) to absolute download URL.
    pub download_links: BTreeMap<String, String>,
    /// Reserved; always empty.
    pub genres: Vec<String>,
    /// Category labels in feed order.
    pub tags: Vec<String>,
    pub size: Option<String>,
    /// Absolute URL of the first JPEG cover offered.
    pub cover_image: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub language: Option<String>,
    /// Absolute URL of the book's web page.
    pub web_link: Option<String>,
}

impl Book {
    /// Author names joined for display, e.g. `"A. Author, B. Author"`.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Available format labels in map order.
    #[must_use]
    pub fn format_labels(&self) -> Vec<&str> {
        self.download_links.keys().map(String::as_str).collect()
    }
}
