//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

use flibusta_core::DEFAULT_BASE_URL;

/// Search for books and authors in the Flibusta OPDS catalog.
///
/// Run without a subcommand for an interactive session.
#[derive(Parser, Debug)]
#[command(name = "flibusta")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog base URL (for mirrors)
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Per-request timeout in seconds (1-300)
    #[arg(short = 't', long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=300), global = true)]
    pub timeout: u64,

    /// Maximum number of results to collect (soft cap, 1-1000)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=1000), global = true)]
    pub limit: Option<u16>,

    /// Print results as JSON instead of tables (disables prompts)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the catalog for books or authors
    Search(SearchArgs),
    /// List all books by a specific author ID
    AuthorBooks(AuthorBooksArgs),
}

/// Arguments for `flibusta search`.
#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search query (book title or author name)
    pub query: String,

    /// Search for books (default)
    #[arg(long, overrides_with = "no_books")]
    pub books: bool,

    /// Do not search for books
    #[arg(long, overrides_with = "books")]
    pub no_books: bool,

    /// Search for authors
    #[arg(long)]
    pub authors: bool,
}

impl SearchArgs {
    /// Books are searched unless disabled, and always when authors are not searched.
    #[must_use]
    pub fn search_books(&self) -> bool {
        !self.no_books || !self.authors
    }
}

/// Arguments for `flibusta author-books`.
#[derive(clap::Args, Debug)]
pub struct AuthorBooksArgs {
    /// The ID of the author to fetch books for
    pub author_id: String,
}
