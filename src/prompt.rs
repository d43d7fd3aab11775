//! Line-oriented interactive prompts.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Source of interactive answers.
pub trait Prompter {
    /// Shows `message` and returns the trimmed answer, or `default` when it is empty.
    fn ask(&mut self, message: &str, default: &str) -> Result<String>;
}

/// Prompter reading answers from stdin and writing prompts to stdout.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, message: &str, default: &str) -> Result<String> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        ask_with(&mut input, &mut output, message, default)
    }
}

/// Prompts on `output` and reads one line from `input`.
///
/// End of input counts as an empty answer.
pub fn ask_with(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
    default: &str,
) -> Result<String> {
    if default.is_empty() {
        write!(output, "{message}: ")?;
    } else {
        write!(output, "{message} ({default}): ")?;
    }
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read answer from stdin")?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

/// Outcome of a "pick a number from the table" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Empty answer.
    Skip,
    /// Zero-based index into the listed rows.
    Index(usize),
    /// A number outside `1..=len`.
    OutOfRange,
    /// Not a number at all.
    NotANumber,
}

/// Interprets a 1-based row number typed by the user.
#[must_use]
pub fn parse_selection(answer: &str, len: usize) -> Selection {
    let answer = answer.trim();
    if answer.is_empty() {
        return Selection::Skip;
    }
    match answer.parse::<usize>() {
        Ok(number) if (1..=len).contains(&number) => Selection::Index(number - 1),
        Ok(_) => Selection::OutOfRange,
        // negative numbers are numbers, just never valid rows
        Err(_) if answer.parse::<i64>().is_ok() => Selection::OutOfRange,
        Err(_) => Selection::NotANumber,
    }
}
