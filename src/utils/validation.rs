//! Centralized query validation for the CLI and web front ends.
//!
//! The matching engine accepts any strings. Callers clean user input here
//! first: trim, drop blanks, and enforce size limits.

/// Maximum number of part numbers accepted in one batch (DOS protection)
pub const MAX_QUERIES: usize = 500;

/// Maximum length of a single part number, in characters
pub const MAX_QUERY_LENGTH: usize = 128;

/// Query validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("No part number provided")]
    Empty,
    #[error("Too many part numbers: {0} exceeds maximum of {MAX_QUERIES}")]
    TooMany(usize),
    #[error("Part number too long: exceeds {MAX_QUERY_LENGTH} characters")]
    TooLong,
}

/// Trim queries and drop blank ones.
///
/// # Errors
///
/// Returns `QueryError::Empty` if nothing is left after trimming,
/// `QueryError::TooMany` if the batch exceeds [`MAX_QUERIES`], or
/// `QueryError::TooLong` if any query exceeds [`MAX_QUERY_LENGTH`].
///
/// # Examples
///
/// ```
/// use chip_xref::utils::validation::{clean_queries, QueryError};
///
/// assert_eq!(clean_queries([" NE555 ", ""]).unwrap(), vec!["NE555"]);
/// assert_eq!(clean_queries(["  "]), Err(QueryError::Empty));
/// ```
pub fn clean_queries<I, S>(queries: I) -> Result<Vec<String>, QueryError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned = Vec::new();
    for query in queries {
        let query = query.as_ref().trim();
        if query.is_empty() {
            continue;
        }
        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(QueryError::TooLong);
        }
        if cleaned.len() >= MAX_QUERIES {
            return Err(QueryError::TooMany(cleaned.len() + 1));
        }
        cleaned.push(query.to_string());
    }

    if cleaned.is_empty() {
        return Err(QueryError::Empty);
    }
    Ok(cleaned)
}

/// Split free-form batch input into part numbers.
///
/// Separators are commas (ASCII and full-width), line breaks and any other
/// whitespace, matching how part lists are pasted from BOMs and chat.
#[must_use]
pub fn split_batch_input(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c == '，' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
