//! Interactive mode: pick an action, then run it.

use std::io::Write;

use anyhow::{Context, Result, bail};

use super::Session;

const ACTION_PROMPT: &str = "Choose action [search/author-books]";

impl<W: Write> Session<W> {
    /// Asks which flow to run and its argument, then runs it.
    ///
    /// Unknown actions are asked again; an empty query or author ID ends
    /// the session without fetching.
    pub async fn run_interactive(&mut self) -> Result<()> {
        self.line("Welcome to Flibusta Searcher!")?;
        loop {
            match self.ask(ACTION_PROMPT, "search")?.as_str() {
                "search" => {
                    let query = self.ask("Enter search query (book title or author)", "")?;
                    if query.is_empty() {
                        return Ok(());
                    }
                    return self.search_books(&query).await;
                }
                "author-books" => {
                    let author_id = self.ask("Enter Author ID", "")?;
                    if author_id.is_empty() {
                        return Ok(());
                    }
                    return self.run_author_books_command(&author_id).await;
                }
                other => self.line(&format!(
                    "Unknown action '{other}'. Choose 'search' or 'author-books'."
                ))?,
            }
        }
    }

    fn ask(&mut self, message: &str, default: &str) -> Result<String> {
        let Some(prompter) = self.prompter.as_mut() else {
            bail!("Interactive mode needs a terminal");
        };
        prompter
            .ask(message, default)
            .with_context(|| format!("Failed to read answer to '{message}'"))
    }
}
