//! Author-mode extraction.

use url::Url;

use crate::model::Author;

use super::document::{DEFAULT_REL, FeedDocument};
use super::heuristics::{book_count_token, last_path_segment, parse_book_count, resolve_href};
use super::{FeedError, FeedPage};

/// Parses one page of an author search feed.
///
/// The book count is the leading integer of each entry's summary. Entries
/// without an `alternate` link are skipped.
///
/// # Errors
///
/// Returns [`FeedError`] when an entry's summary carries no book count, or
/// when the count of a kept entry is not a non-negative integer. The page is
/// abandoned in both cases.
pub fn parse_authors(body: &[u8], base_url: &Url) -> Result<FeedPage<Author>, FeedError> {
    let document = FeedDocument::parse(body);
    let next_url = document
        .next_href()
        .and_then(|href| resolve_href(base_url, href));

    let mut records = Vec::new();
    for entry in &document.entries {
        let name = entry.title.clone().unwrap_or_default();
        let token = book_count_token(entry.summary_text())
            .ok_or_else(|| FeedError::missing_book_count(&name))?;

        let Some(link) = entry.links.iter().find(|link| link.rel == DEFAULT_REL) else {
            continue;
        };
        let number_of_books = parse_book_count(&name, token)?;

        records.push(Author {
            id: last_path_segment(&link.href).to_string(),
            link: resolve_href(base_url, &link.href).unwrap_or_else(|| link.href.clone()),
            name,
            number_of_books,
        });
    }

    Ok(FeedPage { records, next_url })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://flibusta.is").unwrap()
    }

    fn author_entry(title: &str, summary: &str, link: &str) -> String {
        format!(
            r#"<entry><title>{title}</title><content type="text">{summary}</content>{link}</entry>"#
        )
    }

    fn feed(entries: &[String]) -> Vec<u8> {
        format!(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">{}</feed>"#,
            entries.concat()
        )
        .into_bytes()
    }

    #[test]
    fn test_author_with_alternate_link() {
        let body = feed(&[author_entry(
            "Bulgakov Mikhail",
            "57 книг",
            r#"<link href="/opds/author/2312" type="application/atom+xml;profile=opds-catalog"/>"#,
        )]);
        let page = parse_authors(&body, &base()).unwrap();
        assert_eq!(
            page.records,
            vec![Author {
                id: "2312".to_string(),
                name: "Bulgakov Mikhail".to_string(),
                link: "https://flibusta.is/opds/author/2312".to_string(),
                number_of_books: 57,
            }]
        );
    }

    #[test]
    fn test_zero_books_summary() {
        let body = feed(&[author_entry(
            "Nobody",
            "0 books",
            r#"<link href="/opds/author/1" rel="alternate"/>"#,
        )]);
        let page = parse_authors(&body, &base()).unwrap();
        assert_eq!(page.records[0].number_of_books, 0);
    }

    #[test]
    fn test_invalid_count_propagates() {
        let body = feed(&[author_entry(
            "Broken",
            "abc books",
            r#"<link href="/opds/author/1" rel="alternate"/>"#,
        )]);
        let err = parse_authors(&body, &base()).unwrap_err();
        assert!(matches!(err, FeedError::InvalidBookCount { ref token, .. } if token == "abc"));
    }

    #[test]
    fn test_entry_without_alternate_link_is_skipped() {
        let body = feed(&[
            author_entry("Skipped", "3 books", r#"<link href="/x" rel="related"/>"#),
            author_entry("Kept", "4 books", r#"<link href="/opds/author/4"/>"#),
        ]);
        let page = parse_authors(&body, &base()).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].name, "Kept");
    }

    #[test]
    fn test_invalid_count_on_skipped_entry_is_ignored() {
        let body = feed(&[author_entry("Skipped", "many books", "")]);
        let page = parse_authors(&body, &base()).unwrap();
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_missing_summary_propagates_even_without_link() {
        let body = feed(&["<entry><title>Silent</title></entry>".to_string()]);
        let err = parse_authors(&body, &base()).unwrap_err();
        assert_eq!(err, FeedError::missing_book_count("Silent"));
    }

    #[test]
    fn test_next_link_detected_without_entries() {
        let body = br#"<feed><link rel="next" href="/opds/search?pageNumber=2"/></feed>"#;
        let page = parse_authors(body, &base()).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(
            page.next_url.as_deref(),
            Some("https://flibusta.is/opds/search?pageNumber=2")
        );
    }
}
