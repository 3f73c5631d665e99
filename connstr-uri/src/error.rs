//! Errors raised by the URI grammar parser.

use thiserror::Error;

/// Errors that can occur while parsing a connection string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not match the connection-string grammar.
    ///
    /// Carries the rejected input verbatim, credentials included. The
    /// `Display` text masks the password.
    #[error("Invalid connection string format: {}", mask_password(.0))]
    InvalidFormat(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Replace the password between `user:` and the last `@` of the authority with `***`.
fn mask_password(input: &str) -> String {
    let Some(start) = input.find("://").map(|i| i + 3) else {
        return input.to_string();
    };
    let rest = &input[start..];
    let authority = rest.find(['/', '?', '#']).map_or(rest, |end| &rest[..end]);

    let Some(at) = authority.rfind('@') else {
        return input.to_string();
    };
    let Some(colon) = authority[..at].find(':') else {
        return input.to_string();
    };

    format!(
        "{}***{}",
        &input[..start + colon + 1],
        &input[start + at..]
    )
}
