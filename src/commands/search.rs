//! Search command handler: authors first, then books.

use std::io::Write;

use anyhow::{Context, Result};
use flibusta_core::{Author, Book, DEFAULT_AUTHOR_SEARCH_LIMIT, DEFAULT_BOOK_LIMIT};

use crate::cli::SearchArgs;
use crate::output;
use crate::prompt::Selection;

use super::{NOT_A_NUMBER, Session};

const AUTHOR_PROMPT: &str = "Enter Author number (or press Enter to skip)";

impl<W: Write> Session<W> {
    pub async fn run_search_command(&mut self, args: &SearchArgs) -> Result<()> {
        if self.json && args.authors && args.search_books() {
            // one document on stdout, keyed by record kind
            let authors = self.fetch_authors(&args.query).await?;
            let books = self.fetch_books(&args.query).await?;
            let json = output::render_search_json(&authors, &books)?;
            return self.line(&json);
        }
        if args.authors {
            self.search_authors(&args.query).await?;
        }
        if args.search_books() {
            self.search_books(&args.query).await?;
        }
        Ok(())
    }

    pub(super) async fn search_books(&mut self, query: &str) -> Result<()> {
        let books = self.fetch_books(query).await?;
        if self.json {
            return self.print_json(&books);
        }
        if books.is_empty() {
            return self.line(output::NO_BOOKS);
        }
        self.line(&output::render_books_table(&books))
    }

    async fn fetch_books(&self, query: &str) -> Result<Vec<Book>> {
        let spinner = output::spinner(format!("Searching books for: {query}"), self.show_progress);
        let books = self
            .client
            .search_books(query, self.limit_or(DEFAULT_BOOK_LIMIT))
            .await;
        spinner.finish_and_clear();
        books.with_context(|| format!("Book search for '{query}' failed"))
    }

    async fn fetch_authors(&self, query: &str) -> Result<Vec<Author>> {
        let spinner =
            output::spinner(format!("Searching authors for: {query}"), self.show_progress);
        let authors = self
            .client
            .search_authors(query, self.limit_or(DEFAULT_AUTHOR_SEARCH_LIMIT))
            .await;
        spinner.finish_and_clear();
        authors.with_context(|| format!("Author search for '{query}' failed"))
    }

    async fn search_authors(&mut self, query: &str) -> Result<()> {
        let authors = self.fetch_authors(query).await?;
        if self.json {
            return self.print_json(&authors);
        }
        if authors.is_empty() {
            return self.line(output::NO_AUTHORS);
        }
        self.line(&output::render_authors_table(&authors))?;

        match self.select(AUTHOR_PROMPT, authors.len())? {
            Some(Selection::Index(index)) => {
                let author_id = authors[index].id.clone();
                self.show_author_books(&author_id, output::NO_AUTHOR_BOOKS, true)
                    .await
            }
            Some(Selection::OutOfRange) => self.line("Invalid author number."),
            Some(Selection::NotANumber) => self.line(NOT_A_NUMBER),
            Some(Selection::Skip) | None => Ok(()),
        }
    }
}
