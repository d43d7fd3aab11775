//! Book-mode extraction.

use std::collections::BTreeMap;

use tracing::debug;
use url::Url;

use crate::model::{Author, Book, UNKNOWN_TITLE};

use super::FeedPage;
use super::document::{FeedDocument, RawEntry};
use super::heuristics::{format_label, last_path_segment, resolve_href};

const COVER_MEDIA_TYPE: &str = "image/jpeg";

/// Parses one page of a book feed.
///
/// Never fails: malformed documents yield whatever entries could be read.
#[must_use]
pub fn parse_books(body: &[u8], base_url: &Url) -> FeedPage<Book> {
    let document = FeedDocument::parse(body);
    let next_url = document
        .next_href()
        .and_then(|href| resolve_href(base_url, href));

    let records = document
        .entries
        .iter()
        .map(|entry| book_from_entry(entry, base_url))
        .collect();

    FeedPage { records, next_url }
}

fn book_from_entry(entry: &RawEntry, base_url: &Url) -> Book {
    let authors = entry
        .authors
        .iter()
        .map(|author| {
            let href = author.href.clone().unwrap_or_default();
            Author {
                id: last_path_segment(&href).to_string(),
                name: author.name.clone().unwrap_or_default(),
                link: href,
                number_of_books: 0,
            }
        })
        .collect();

    let mut download_links = BTreeMap::new();
    let mut cover_image = None;
    for link in &entry.links {
        if link.media_type.starts_with("application/") && link.rel != "related" {
            match (format_label(&link.href), resolve_href(base_url, &link.href)) {
                // later links with the same label overwrite earlier ones
                (Some(label), Some(url)) => {
                    download_links.insert(label, url);
                }
                _ => debug!(href = %link.href, "Skipping unusable acquisition link"),
            }
        }

        if link.media_type == COVER_MEDIA_TYPE && cover_image.is_none() {
            cover_image = resolve_href(base_url, &link.href);
        }
    }

    let tags = entry
        .categories
        .iter()
        .filter_map(|category| category.label.clone().filter(|label| !label.is_empty()))
        .collect();

    Book {
        title: entry
            .title
            .clone()
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors,
        book_id: entry.id.clone().unwrap_or_default(),
        download_links,
        genres: Vec::new(),
        tags,
        size: None,
        cover_image,
        summary: entry.summary_text().map(str::to_string),
        published: entry.published_text().map(str::to_string),
        language: entry.language.clone(),
        web_link: entry
            .primary_link()
            .and_then(|href| resolve_href(base_url, href)),
    }
}
