//! Error types for connection mapping and TLS resolution.

use crate::Dialect;
use connstr_uri::ParseError;
use thiserror::Error;

/// A mutually exclusive combination of TLS query parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// TLS was explicitly disabled while certificate parameters were given.
    #[error("{}", incompatible_ssl_message(.0))]
    IncompatibleSslParams(Dialect),
}

fn incompatible_ssl_message(dialect: &Dialect) -> &'static str {
    match dialect {
        Dialect::MySql => "ssl=false cannot be used with SSL certificate parameters",
        _ => {
            "sslmode=disable cannot be used with SSL certificate parameters (sslcert, sslkey, sslrootcert, sslpassword, sslservername)"
        }
    }
}

/// Errors that can occur while turning a connection string into driver configuration.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The connection string does not match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The TLS parameters contradict each other.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading a certificate file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Environment variable not found.
    #[error("Environment variable not found: {0}")]
    EnvNotFound(String),
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;
