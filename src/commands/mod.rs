//! CLI command handlers.

mod author_books;
mod interactive;
mod search;

use std::io::Write;

use anyhow::{Context, Result};
use flibusta_core::{Book, CatalogClient, DEFAULT_BOOK_LIMIT};
use serde::Serialize;

use crate::output;
use crate::prompt::{Prompter, Selection, parse_selection};

const BOOK_DETAILS_PROMPT: &str = "Enter book number for full info (or press Enter to skip)";
const NOT_A_NUMBER: &str = "Please enter a valid number.";

/// State shared by every command: the client, output mode and where answers come from.
///
/// Without a prompter the follow-up selection prompts are skipped.
pub struct Session<W: Write> {
    client: CatalogClient,
    out: W,
    json: bool,
    limit: Option<usize>,
    show_progress: bool,
    prompter: Option<Box<dyn Prompter>>,
}

impl<W: Write> Session<W> {
    pub fn new(client: CatalogClient, out: W) -> Self {
        Self {
            client,
            out,
            json: false,
            limit: None,
            show_progress: false,
            prompter: None,
        }
    }

    /// Switches to JSON output; JSON sessions never prompt.
    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub fn prompter(mut self, prompter: Option<Box<dyn Prompter>>) -> Self {
        self.prompter = prompter;
        self
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn limit_or(&self, default: usize) -> usize {
        self.limit.unwrap_or(default)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").context("Failed to write to stdout")
    }

    fn print_json<T: Serialize>(&mut self, records: &[T]) -> Result<()> {
        let json = output::render_json(records)?;
        self.line(&json)
    }

    /// Asks for a row number, or returns `None` when prompts are off.
    fn select(&mut self, message: &str, len: usize) -> Result<Option<Selection>> {
        if self.json {
            return Ok(None);
        }
        match self.prompter.as_mut() {
            Some(prompter) => Ok(Some(parse_selection(&prompter.ask(message, "")?, len))),
            None => Ok(None),
        }
    }

    /// Books of one author, shown as a table.
    ///
    /// With `offer_details` the user may pick a row to see its details.
    async fn show_author_books(
        &mut self,
        author_id: &str,
        empty_message: &str,
        offer_details: bool,
    ) -> Result<()> {
        let spinner = output::spinner(
            format!("Fetching books for author {author_id}"),
            self.show_progress,
        );
        let books = self
            .client
            .get_author_books(author_id, self.limit_or(DEFAULT_BOOK_LIMIT))
            .await;
        spinner.finish_and_clear();
        let books = books.with_context(|| format!("Failed to read books of author {author_id}"))?;

        if self.json {
            return self.print_json(&books);
        }
        if books.is_empty() {
            return self.line(empty_message);
        }
        self.line(&output::render_books_table(&books))?;
        if offer_details {
            self.offer_book_details(&books)?;
        }
        Ok(())
    }

    fn offer_book_details(&mut self, books: &[Book]) -> Result<()> {
        match self.select(BOOK_DETAILS_PROMPT, books.len())? {
            Some(Selection::Index(index)) => {
                let details = output::render_book_details(&books[index]);
                self.line(&details)
            }
            Some(Selection::OutOfRange) => self.line("Invalid book number."),
            Some(Selection::NotANumber) => self.line(NOT_A_NUMBER),
            Some(Selection::Skip) | None => Ok(()),
        }
    }
}
