//! Author-books command handler.

use std::io::Write;

use anyhow::Result;

use crate::output;

use super::Session;

impl<W: Write> Session<W> {
    /// Lists every book of one author.
    pub async fn run_author_books_command(&mut self, author_id: &str) -> Result<()> {
        self.show_author_books(author_id, output::NO_BOOKS, false)
            .await
    }
}
