//! Builders for OPDS fixture documents.

/// Wraps entries (and an optional `rel="next"` href) into a feed document.
pub fn feed(entries: &[String], next: Option<&str>) -> String {
    let next_link = next
        .map(|href| {
            format!(
                r#"<link rel="next" href="{}" type="application/atom+xml;profile=opds-catalog"/>"#,
                href.replace('&', "&amp;")
            )
        })
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:dc="http://purl.org/dc/terms/" xmlns:opds="http://opds-spec.org/2010/catalog">
<id>tag:search</id>
<title>Search results</title>
<link href="/opds" rel="start" type="application/atom+xml;profile=opds-catalog"/>
{next_link}
{}
</feed>"#,
        entries.concat()
    )
}

/// A book entry with one author, an fb2 acquisition link and a web page link.
pub fn book_entry(id: u32, title: &str) -> String {
    format!(
        r#"<entry>
  <updated>2024-01-01T00:00:00+01:00</updated>
  <id>tag:book:{id}</id>
  <title>{title}</title>
  <author><name>Author {id}</name><uri>/a/{id}</uri></author>
  <link href="/b/{id}/fb2" rel="http://opds-spec.org/acquisition/open-access" type="application/fb2+zip"/>
  <link href="/b/{id}" rel="alternate" type="text/html" title="Book page"/>
</entry>"#
    )
}

/// An author entry whose summary starts with `count_token`.
pub fn author_entry(id: u32, name: &str, count_token: &str) -> String {
    format!(
        r#"<entry>
  <updated>2024-01-01T00:00:00+01:00</updated>
  <id>tag:author:{id}</id>
  <title>{name}</title>
  <content type="text">{count_token} книг</content>
  <link href="/opds/author/{id}" type="application/atom+xml;profile=opds-catalog"/>
</entry>"#
    )
}

/// A page of `count` books numbered from `first_id`.
pub fn books_page(first_id: u32, count: u32, next: Option<&str>) -> String {
    let entries: Vec<String> = (first_id..first_id + count)
        .map(|id| book_entry(id, &format!("Book {id}")))
        .collect();
    feed(&entries, next)
}
