//! One-shot connection configuration.

use crate::env::{DATABASE_URL, EnvSource, StdEnvSource};
use crate::tls::{self, TlsPolicy};
use crate::{ConnectionFields, ConnectionResult, Dialect, ValidationError};
use connstr_uri::ParsedUri;
use serde::Serialize;
use tracing::info;

/// Everything a pool constructor needs: semantic fields plus the resolved
/// TLS policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    /// Target dialect.
    pub dialect: Dialect,
    /// Host, port, credentials, database and raw options.
    #[serde(flatten)]
    pub fields: ConnectionFields,
    /// TLS policy; `None` leaves the driver default in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<TlsPolicy>,
}

impl ConnectionConfig {
    /// Parse a connection string and resolve its TLS policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use connstr_connection::{ConnectionConfig, Dialect, TlsPolicy};
    ///
    /// let config = ConnectionConfig::parse(
    ///     "postgresql://user@localhost:5432/mydb?sslmode=disable",
    ///     Dialect::Postgres,
    /// )
    /// .unwrap();
    /// assert_eq!(config.fields.host, "localhost");
    /// assert_eq!(config.ssl, Some(TlsPolicy::Boolean(false)));
    /// ```
    pub fn parse(input: &str, dialect: Dialect) -> ConnectionResult<Self> {
        let uri = ParsedUri::parse(input)?;
        Ok(Self::from_uri(&uri, dialect)?)
    }

    /// Build a configuration from an already parsed connection string.
    pub fn from_uri(uri: &ParsedUri, dialect: Dialect) -> Result<Self, ValidationError> {
        let ssl = tls::resolve(dialect, uri.query_params())?;
        Ok(Self {
            dialect,
            fields: ConnectionFields::from_uri(uri),
            ssl,
        })
    }

    /// Load the connection string from the environment variable `var`.
    pub fn from_env(var: &str, dialect: Dialect) -> ConnectionResult<Self> {
        Self::from_source(&StdEnvSource, var, dialect)
    }

    /// Load the connection string from `DATABASE_URL`.
    pub fn from_database_url(dialect: Dialect) -> ConnectionResult<Self> {
        Self::from_env(DATABASE_URL, dialect)
    }

    /// Load the connection string from `var` in a custom environment source.
    pub fn from_source<S: EnvSource + ?Sized>(
        source: &S,
        var: &str,
        dialect: Dialect,
    ) -> ConnectionResult<Self> {
        let url = source.require(var)?;
        let config = Self::parse(url.trim(), dialect)?;
        info!(
            var = var,
            dialect = %dialect,
            host = %config.fields.host,
            tls = config.ssl.is_some(),
            "Loaded connection configuration from environment"
        );
        Ok(config)
    }

    /// Rebuild the canonical connection string. Empty when the host is empty.
    pub fn to_connection_string(&self) -> String {
        self.fields.build(self.dialect)
    }

    /// Replace certificate paths in the TLS policy with file contents.
    pub fn materialize(mut self) -> ConnectionResult<Self> {
        if let Some(policy) = self.ssl.take() {
            self.ssl = Some(tls::materialize(policy)?);
        }
        Ok(self)
    }
}
