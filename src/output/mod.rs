//! CLI output formatting and display helpers.

use std::time::Duration;

use anyhow::{Context, Result};
use flibusta_core::{Author, Book};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// Widest a title cell may get before it is truncated.
const TITLE_WIDTH: usize = 60;

/// Widest a description cell may get before it is truncated.
const DESCRIPTION_WIDTH: usize = 400;

/// Message when a book search returned nothing.
pub const NO_BOOKS: &str = "No books found.";

/// Message when an author search returned nothing.
pub const NO_AUTHORS: &str = "No authors found.";

/// Message when an author listing returned nothing.
pub const NO_AUTHOR_BOOKS: &str = "No books found for this author.";

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Spinner shown on stderr while pages are fetched; hidden when stderr is not a terminal.
pub fn spinner(message: impl Into<String>, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Pretty-printed JSON for any record list.
pub fn render_json<T: Serialize>(records: &[T]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize results as JSON")
}

#[derive(Serialize)]
struct SearchResults<'a> {
    authors: &'a [Author],
    books: &'a [Book],
}

/// Pretty-printed JSON object holding both author and book results.
pub fn render_search_json(authors: &[Author], books: &[Book]) -> Result<String> {
    serde_json::to_string_pretty(&SearchResults { authors, books })
        .context("Failed to serialize results as JSON")
}

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "Nr.")]
    number: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    authors: String,
    #[tabled(rename = "Formats")]
    formats: String,
}

#[derive(Tabled)]
struct AuthorRow {
    #[tabled(rename = "Nr.")]
    number: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Books count")]
    number_of_books: u32,
    #[tabled(rename = "Link")]
    link: String,
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// One `format: url` line per download link.
fn format_links(book: &Book) -> String {
    book.download_links
        .iter()
        .map(|(format, url)| format!("{format}: {url}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Books table with a `Found Books (N)` title line.
pub fn render_books_table(books: &[Book]) -> String {
    let title_width = TITLE_WIDTH.min(terminal_width() / 2);
    let rows: Vec<BookRow> = books
        .iter()
        .enumerate()
        .map(|(index, book)| BookRow {
            number: index + 1,
            title: truncate_to_width(&book.title, title_width),
            authors: book.author_names(),
            formats: format_links(book),
        })
        .collect();
    format!("Found Books ({})\n{}", books.len(), styled(Table::new(rows)))
}

/// Authors table with a `Found Authors (N)` title line.
pub fn render_authors_table(authors: &[Author]) -> String {
    let rows: Vec<AuthorRow> = authors
        .iter()
        .enumerate()
        .map(|(index, author)| AuthorRow {
            number: index + 1,
            id: author.id.clone(),
            name: author.name.clone(),
            number_of_books: author.number_of_books,
            link: author.link.clone(),
        })
        .collect();
    format!(
        "Found Authors ({})\n{}",
        authors.len(),
        styled(Table::new(rows))
    )
}

/// Two-column details table; rows for absent optional fields are omitted.
pub fn render_book_details(book: &Book) -> String {
    let mut rows = vec![
        DetailRow {
            field: "Title",
            value: book.title.clone(),
        },
        DetailRow {
            field: "Authors",
            value: book.author_names(),
        },
    ];
    if !book.tags.is_empty() {
        rows.push(DetailRow {
            field: "Tags",
            value: book.tags.join(", "),
        });
    }
    let optional = [
        ("Size", book.size.as_deref()),
        ("Cover", book.cover_image.as_deref()),
    ];
    rows.extend(optional.into_iter().filter_map(|(field, value)| {
        value.map(|value| DetailRow {
            field,
            value: value.to_string(),
        })
    }));
    rows.push(DetailRow {
        field: "Formats",
        value: format_links(book),
    });
    let trailing = [
        ("Language", book.language.as_deref()),
        ("Published", book.published.as_deref()),
        ("Description", book.summary.as_deref()),
    ];
    rows.extend(trailing.into_iter().filter_map(|(field, value)| {
        value.map(|value| DetailRow {
            field,
            value: truncate_to_width(value, DESCRIPTION_WIDTH),
        })
    }));

    format!("Book Details\n{}", styled(Table::new(rows)))
}
