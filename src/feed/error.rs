//! Error types for feed entry parsing.
//!
//! Only data errors live here. Transport failures are a separate category
//! ([`crate::catalog::FetchError`]) that never leaves the paginator.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while turning a feed page into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Author entry has no summary text to take a book count from
    #[error(
        "author entry '{entry}' has no book count in its summary\n  Suggestion: The catalog response format may have changed"
    )]
    MissingBookCount {
        /// Title of the offending entry
        entry: String,
    },

    /// Leading summary token of an author entry is not a book count
    #[error(
        "author entry '{entry}' has invalid book count '{token}': {source}\n  Suggestion: The catalog response format may have changed"
    )]
    InvalidBookCount {
        /// Title of the offending entry
        entry: String,
        /// The token that failed to parse
        token: String,
        /// Integer parse failure
        #[source]
        source: ParseIntError,
    },
}

impl FeedError {
    /// Creates a `MissingBookCount` error.
    #[must_use]
    pub fn missing_book_count(entry: &str) -> Self {
        Self::MissingBookCount {
            entry: entry.to_string(),
        }
    }

    /// Creates an `InvalidBookCount` error.
    #[must_use]
    pub fn invalid_book_count(entry: &str, token: &str, source: ParseIntError) -> Self {
        Self::InvalidBookCount {
            entry: entry.to_string(),
            token: token.to_string(),
            source,
        }
    }
}
