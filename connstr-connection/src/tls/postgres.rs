//! PostgreSQL `sslmode` / `ssl` resolution.

use super::{TlsPolicy, param, parse_flag};
use crate::{Dialect, ValidationError};
use connstr_uri::QueryParams;
use serde::{Deserialize, Serialize};

/// Keys that carry certificate material or identity.
const CERTIFICATE_KEYS: [&str; 5] = [
    "sslcert",
    "sslkey",
    "sslrootcert",
    "sslpassword",
    "sslservername",
];

/// Value of the `sslmode` query parameter.
///
/// Matching is exact; any other value is kept as [`SslMode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    /// Disable SSL.
    Disable,
    /// Prefer SSL but allow non-SSL.
    Prefer,
    /// Require SSL.
    Require,
    /// Require SSL, skip certificate verification.
    NoVerify,
    /// Require SSL and verify the certificate.
    Verify,
    /// Require SSL and verify the server certificate.
    VerifyCa,
    /// Require SSL and verify the server certificate and hostname.
    VerifyFull,
    /// Unrecognized value.
    Other,
}

impl SslMode {
    /// Parse from string. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "disable" => Self::Disable,
            "prefer" => Self::Prefer,
            "require" => Self::Require,
            "no-verify" => Self::NoVerify,
            "verify" => Self::Verify,
            "verify-ca" => Self::VerifyCa,
            "verify-full" => Self::VerifyFull,
            _ => Self::Other,
        }
    }
}

/// TLS options in the shape the PostgreSQL driver expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresTls {
    /// Whether to reject servers whose certificate fails verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_unauthorized: Option<bool>,
    /// CA certificate (`sslrootcert`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// Client certificate (`sslcert`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    /// Client key (`sslkey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Client key passphrase (`sslpassword`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    /// Server name for SNI (`sslservername`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servername: Option<String>,
}

pub(super) fn resolve(params: &QueryParams) -> Result<Option<TlsPolicy>, ValidationError> {
    let ssl_mode = param(params, "sslmode").map(SslMode::parse);
    let has_certificate_params = CERTIFICATE_KEYS
        .iter()
        .any(|key| param(params, key).is_some());

    // `sslmode` takes precedence over the bare `ssl` flag
    if ssl_mode.is_none() && !has_certificate_params {
        return Ok(param(params, "ssl")
            .and_then(parse_flag)
            .map(TlsPolicy::Boolean));
    }

    if ssl_mode == Some(SslMode::Disable) && has_certificate_params {
        return Err(ValidationError::IncompatibleSslParams(Dialect::Postgres));
    }

    if !has_certificate_params {
        match ssl_mode {
            Some(SslMode::Disable) => return Ok(Some(TlsPolicy::Boolean(false))),
            Some(SslMode::NoVerify) => return Ok(Some(reject_unauthorized(false))),
            Some(SslMode::Verify) => return Ok(Some(reject_unauthorized(true))),
            _ => {}
        }
    }

    let root_cert = param(params, "sslrootcert");
    let relaxed = matches!(ssl_mode, Some(SslMode::Prefer | SslMode::NoVerify))
        || (ssl_mode == Some(SslMode::Require) && root_cert.is_none() && !has_certificate_params);

    Ok(Some(TlsPolicy::Postgres(PostgresTls {
        reject_unauthorized: relaxed.then_some(false),
        ca: root_cert.map(str::to_string),
        cert: param(params, "sslcert").map(str::to_string),
        key: param(params, "sslkey").map(str::to_string),
        passphrase: param(params, "sslpassword").map(str::to_string),
        servername: param(params, "sslservername").map(str::to_string),
    })))
}

fn reject_unauthorized(reject: bool) -> TlsPolicy {
    TlsPolicy::Postgres(PostgresTls {
        reject_unauthorized: Some(reject),
        ..Default::default()
    })
}
