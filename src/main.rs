//! CLI entry point for the flibusta search tool.

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use flibusta_core::{CatalogClient, CatalogConfig};
use tracing::debug;

mod cli;
mod commands;
mod output;
mod prompt;

use cli::{Args, Command};
use commands::Session;
use prompt::{Prompter, StdinPrompter};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr so tables and JSON on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let stdin_is_terminal = io::stdin().is_terminal();
    if args.command.is_none() && !stdin_is_terminal {
        println!("No command given and stdin is not a terminal.");
        println!("Usage: flibusta search <QUERY> [--authors] [--no-books]");
        println!("       flibusta author-books <AUTHOR_ID>");
        return Ok(());
    }

    let config = CatalogConfig::for_base_url(&args.base_url)
        .with_context(|| format!("Invalid --base-url '{}'", args.base_url))?
        .with_timeout(Duration::from_secs(args.timeout));
    let client = CatalogClient::with_config(&config).context("Failed to create catalog client")?;
    debug!(base_url = %client.base_url(), "Catalog client ready");

    let prompter: Option<Box<dyn Prompter>> = if stdin_is_terminal {
        Some(Box::new(StdinPrompter))
    } else {
        None
    };
    let mut session = Session::new(client, io::stdout().lock())
        .json(args.json)
        .limit(args.limit.map(usize::from))
        .show_progress(!args.quiet && !args.json && io::stderr().is_terminal())
        .prompter(prompter);

    match &args.command {
        Some(Command::Search(search)) => session.run_search_command(search).await,
        Some(Command::AuthorBooks(author)) => {
            session.run_author_books_command(&author.author_id).await
        }
        None => session.run_interactive().await,
    }
}
