//! Splitting of raw command text into tokens.
//!
//! The grammar is intentionally small:
//!
//! - Tokens are separated by spaces; runs of spaces never produce empty tokens
//! - A token that *starts* with `"` extends to the next `"` and keeps its
//!   interior whitespace verbatim (the quotes themselves are dropped)
//! - A `"` anywhere else is an ordinary character
//!
//! There is no escaping, no single-quote handling and no shell expansion.

use tracing::trace;

use crate::error::{CommandError, CommandResult};

const QUOTE: char = '"';
const SEPARATOR: char = ' ';

/// Splits an argument string into tokens, honouring double-quoted spans.
///
/// Runs of spaces, including leading and trailing ones, are collapsed. A
/// scanner that cut a token at every single space would emit `""` for each
/// extra space; this one never does, so `"a  b"` gives `["a", "b"]`. An empty
/// token only comes from an explicit `""`.
///
/// # Errors
///
/// Returns [`CommandError::UnterminatedQuote`] when a token opens a quote that
/// is never closed.
pub fn tokenize(input: &str) -> CommandResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix(QUOTE) {
            let Some(end) = quoted.find(QUOTE) else {
                return Err(CommandError::UnterminatedQuote {
                    remainder: rest.to_string(),
                });
            };
            tokens.push(quoted[..end].to_string());
            rest = &quoted[end + QUOTE.len_utf8()..];
        } else {
            let end = rest.find(SEPARATOR).unwrap_or(rest.len());
            if end > 0 {
                tokens.push(rest[..end].to_string());
            }
            rest = &rest[end..];
        }
        // Consume one separator; anything else starts the next token directly.
        rest = rest.strip_prefix(SEPARATOR).unwrap_or(rest);
    }

    trace!(input, ?tokens, "Tokenized arguments");
    Ok(tokens)
}

/// Splits a prefix-stripped command line into `(command name, argument string)`.
///
/// The split happens at the first space, which belongs to neither half. Input
/// without a space is all command name and yields an empty argument string.
pub fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(SEPARATOR) {
        Some((name, arguments)) => (name, arguments),
        None => (input, ""),
    }
}

/// Quotes a token so that [`tokenize`] reads it back as a single token.
///
/// Tokens are only quoted when they need it (empty, containing a space, or
/// starting with a quote). A token containing both a space and a `"` cannot be
/// represented and is quoted as-is.
pub fn quote_token(token: &str) -> String {
    if token.is_empty() || token.contains(SEPARATOR) || token.starts_with(QUOTE) {
        format!("{QUOTE}{token}{QUOTE}")
    } else {
        token.to_string()
    }
}

/// Joins tokens back into an argument string, quoting where necessary.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|token| quote_token(token.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
