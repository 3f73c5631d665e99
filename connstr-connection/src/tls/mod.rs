//! Per-dialect TLS policy resolution.
//!
//! Query parameters of a connection string are translated into the TLS
//! option shape each driver expects. Rules differ per dialect:
//!
//! ## PostgreSQL
//!
//! | query | policy |
//! |---|---|
//! | `sslmode=disable` | `false` |
//! | `sslmode=require` | `{ rejectUnauthorized: false }` |
//! | `sslmode=verify` | `{ rejectUnauthorized: true }` |
//! | `sslmode=verify-full&sslcert=C&sslkey=K&sslrootcert=R` | `{ cert: C, key: K, ca: R }` |
//! | `ssl=true` | `true` |
//! | `sslmode=disable&sslcert=...` | error |
//!
//! ## MySQL
//!
//! | query | policy |
//! |---|---|
//! | (none) or `ssl=false` | absent |
//! | `ssl=true` | `{}` |
//! | `sslca=/p` | `{ ca: "/p" }` |
//! | `ssl=false&sslcert=...` | error |
//!
//! An absent policy (`None`) means "use the driver default" and is distinct
//! from an explicit `false`.

mod materialize;
mod mysql;
mod postgres;

pub use materialize::materialize;
pub use mysql::MySqlTls;
pub use postgres::{PostgresTls, SslMode};

use crate::{Dialect, ValidationError};
use connstr_uri::QueryParams;
use serde::Serialize;
use tracing::debug;

/// Driver-ready TLS configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TlsPolicy {
    /// Plain on/off flag.
    Boolean(bool),
    /// PostgreSQL certificate bundle.
    Postgres(PostgresTls),
    /// MySQL certificate bundle.
    MySql(MySqlTls),
}

impl TlsPolicy {
    /// Whether this policy turns TLS on.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Boolean(false))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(true) => "enabled",
            Self::Boolean(false) => "disabled",
            Self::Postgres(_) | Self::MySql(_) => "certificate",
        }
    }
}

/// Resolve the TLS policy for `dialect` from decoded query parameters.
///
/// Returns `Ok(None)` when the parameters express no opinion. MSSQL and
/// ClickHouse have no TLS vocabulary and always resolve to `None`.
///
/// ```rust
/// use connstr_connection::{Dialect, TlsPolicy, resolve};
/// use connstr_uri::QueryParams;
///
/// let params = QueryParams::parse("sslmode=disable");
/// assert_eq!(resolve(Dialect::Postgres, &params).unwrap(), Some(TlsPolicy::Boolean(false)));
///
/// let params = QueryParams::parse("ssl=false&sslcert=/path/to/cert.pem");
/// assert!(resolve(Dialect::MySql, &params).is_err());
/// ```
pub fn resolve(
    dialect: Dialect,
    params: &QueryParams,
) -> Result<Option<TlsPolicy>, ValidationError> {
    let policy = match dialect {
        Dialect::Postgres => postgres::resolve(params),
        Dialect::MySql => mysql::resolve(params),
        Dialect::MsSql | Dialect::ClickHouse => Ok(None),
    };

    match &policy {
        Ok(resolved) => debug!(
            dialect = %dialect,
            policy = resolved.as_ref().map_or("absent", TlsPolicy::kind),
            "TLS policy resolved"
        ),
        Err(e) => debug!(dialect = %dialect, error = %e, "TLS parameters rejected"),
    }

    policy
}

/// First value for `key`, treating an empty value as absent.
fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params.get(key).filter(|v| !v.is_empty())
}

/// Parse `1`/`0`/`true`/`false`, ignoring ASCII case.
fn parse_flag(value: &str) -> Option<bool> {
    if value == "1" || value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
