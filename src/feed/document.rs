//! Streaming reader for OPDS (Atom) documents.
//!
//! Produces a loosely typed [`FeedDocument`] mirroring what a general-purpose
//! feed library exposes: feed-level links plus entries with their links,
//! authors and categories. Atom defaults are applied while reading so the
//! record extractors never see a missing `rel` or `type`.
//!
//! Malformed input is not an error: reading stops at the first XML error and
//! the entries completed up to that point are returned.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use tracing::warn;

/// Relation assumed for links without a `rel` attribute.
pub(crate) const DEFAULT_REL: &str = "alternate";

const DC_TERMS_NS: &[u8] = b"http://purl.org/dc/terms/";

const HTML_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// A `<link>` element with Atom defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawLink {
    pub rel: String,
    pub href: String,
    pub media_type: String,
}

impl RawLink {
    fn from_attributes(element: &BytesStart<'_>) -> Self {
        let mut rel = None;
        let mut href = None;
        let mut media_type = None;
        for (key, value) in attributes(element) {
            match key.as_str() {
                "rel" => rel = Some(value),
                "href" => href = Some(value),
                "type" => media_type = Some(value),
                _ => {}
            }
        }

        let rel = rel.unwrap_or_else(|| DEFAULT_REL.to_string());
        let media_type = media_type.unwrap_or_else(|| {
            if rel == "self" {
                "application/atom+xml".to_string()
            } else {
                "text/html".to_string()
            }
        });
        Self {
            rel,
            href: href.unwrap_or_default(),
            media_type,
        }
    }
}

/// An `<author>` element of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawAuthor {
    pub name: Option<String>,
    pub href: Option<String>,
}

/// A `<category>` element of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawCategory {
    pub label: Option<String>,
}

/// One `<entry>` with the fields the record extractors consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawEntry {
    pub title: Option<String>,
    pub id: Option<String>,
    pub authors: Vec<RawAuthor>,
    pub links: Vec<RawLink>,
    pub categories: Vec<RawCategory>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published: Option<String>,
    pub issued: Option<String>,
    pub language: Option<String>,
}

impl RawEntry {
    /// Summary text, falling back to `<content>`.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().or(self.content.as_deref())
    }

    /// `<published>`, falling back to `dc:issued`.
    pub fn published_text(&self) -> Option<&str> {
        self.published.as_deref().or(self.issued.as_deref())
    }

    /// Href of the first alternate link with an HTML media type.
    pub fn primary_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == DEFAULT_REL && HTML_TYPES.contains(&link.media_type.as_str()))
            .map(|link| link.href.as_str())
    }
}

/// A whole feed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FeedDocument {
    pub links: Vec<RawLink>,
    pub entries: Vec<RawEntry>,
}

impl FeedDocument {
    /// Href of the first feed-level link with `rel="next"`.
    pub fn next_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "next")
            .map(|link| link.href.as_str())
    }

    /// Reads a document from raw bytes, recovering what it can.
    pub fn parse(body: &[u8]) -> Self {
        let mut reader = NsReader::from_reader(body);
        reader.config_mut().trim_text(true);

        let mut state = ReadState::default();
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_resolved_event_into(&mut buf)
                .map(|(namespace, event)| (is_dublin_core(&namespace), event));
            match event {
                Ok((_, Event::Start(e))) => {
                    state.on_element(&e);
                    state.stack.push(local_name(&e));
                    state.text.clear();
                }
                Ok((_, Event::Empty(e))) => state.on_element(&e),
                Ok((_, Event::Text(e))) => match e.unescape() {
                    Ok(text) => state.text.push_str(&text),
                    Err(error) => {
                        warn!(
                            position = reader.buffer_position(),
                            error = %error,
                            "Invalid text in feed document; keeping entries read so far"
                        );
                        break;
                    }
                },
                Ok((_, Event::CData(e))) => {
                    state.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
                Ok((dublin_core, Event::End(e))) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    state.stack.pop();
                    state.on_end(&name, dublin_core);
                    state.text.clear();
                }
                Ok((_, Event::Eof)) => break,
                Err(error) => {
                    warn!(
                        position = reader.buffer_position(),
                        error = %error,
                        "Malformed feed document; keeping entries read so far"
                    );
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        state.document
    }
}

/// Whether an element name resolved into the DCMI terms namespace.
fn is_dublin_core(namespace: &ResolveResult<'_>) -> bool {
    matches!(namespace, ResolveResult::Bound(Namespace(ns)) if *ns == DC_TERMS_NS)
}

#[derive(Default)]
struct ReadState {
    document: FeedDocument,
    entry: Option<RawEntry>,
    author: Option<RawAuthor>,
    stack: Vec<String>,
    text: String,
}

impl ReadState {
    /// Handles attributes of an opening or self-closing element.
    fn on_element(&mut self, element: &BytesStart<'_>) {
        match local_name(element).as_str() {
            "entry" => self.entry = Some(RawEntry::default()),
            "author" if self.entry.is_some() => self.author = Some(RawAuthor::default()),
            "link" => {
                let link = RawLink::from_attributes(element);
                if let Some(entry) = self.entry.as_mut() {
                    if self.author.is_none() {
                        entry.links.push(link);
                    }
                } else if self.stack.last().is_some_and(|parent| parent == "feed") {
                    self.document.links.push(link);
                }
            }
            "category" => {
                if let Some(entry) = self.entry.as_mut() {
                    let label = attributes(element)
                        .into_iter()
                        .find_map(|(key, value)| (key == "label").then_some(value));
                    entry.categories.push(RawCategory { label });
                }
            }
            _ => {}
        }
    }

    fn on_end(&mut self, name: &str, dublin_core: bool) {
        let text = self.text.trim().to_string();

        if name == "author" {
            if let (Some(author), Some(entry)) = (self.author.take(), self.entry.as_mut()) {
                entry.authors.push(author);
            }
            return;
        }
        if let Some(author) = self.author.as_mut() {
            match name {
                "name" => author.name = Some(text),
                "uri" => author.href = Some(text),
                _ => {}
            }
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        match name {
            "title" => entry.title = Some(text),
            "id" => entry.id = Some(text),
            "summary" => entry.summary = Some(text),
            "content" => entry.content = Some(text),
            "published" => entry.published = Some(text),
            "issued" if dublin_core => entry.issued = Some(text),
            "language" if dublin_core => entry.language = Some(text),
            "entry" => {
                if let Some(entry) = self.entry.take() {
                    self.document.entries.push(entry);
                }
            }
            _ => {}
        }
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Decoded `(local key, value)` pairs; malformed attributes are skipped.
fn attributes(element: &BytesStart<'_>) -> Vec<(String, String)> {
    element
        .attributes()
        .filter_map(Result::ok)
        .filter_map(|attr| {
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}
