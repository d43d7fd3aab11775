//! Catalog-specific string conventions.
//!
//! These rules follow how the catalog shapes its URLs and summaries.
//! Acquisition URLs ending in `/download` are PDF offers, and author
//! summaries start with the number of books.

use url::Url;

use super::FeedError;

/// Last `/`-separated segment of an href (the whole href when it has none).
#[must_use]
pub fn last_path_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

/// Format label for an acquisition link.
///
/// Takes the last path segment and replaces every `download` with `pdf`.
/// Returns `None` when the label would be empty (href ends in `/`).
#[must_use]
pub fn format_label(href: &str) -> Option<String> {
    let label = last_path_segment(href).replace("download", "pdf");
    (!label.is_empty()).then_some(label)
}

/// First whitespace-delimited token of an author summary.
#[must_use]
pub fn book_count_token(summary: Option<&str>) -> Option<&str> {
    summary.and_then(|text| text.split_whitespace().next())
}

/// Parses a book-count token.
///
/// # Errors
///
/// Returns [`FeedError::InvalidBookCount`] when the token is not a
/// non-negative integer.
pub fn parse_book_count(entry: &str, token: &str) -> Result<u32, FeedError> {
    token
        .parse::<u32>()
        .map_err(|source| FeedError::invalid_book_count(entry, token, source))
}

/// Resolves a feed href against the catalog base URL.
///
/// Returns `None` only when the href cannot form a valid URL.
#[must_use]
pub fn resolve_href(base_url: &Url, href: &str) -> Option<String> {
    base_url.join(href).ok().map(String::from)
}
