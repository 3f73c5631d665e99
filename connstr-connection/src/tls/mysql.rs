//! MySQL `ssl` / `ssl*` resolution.

use super::{TlsPolicy, param, parse_flag};
use crate::{Dialect, ValidationError};
use connstr_uri::QueryParams;
use serde::{Deserialize, Serialize};

/// Keys whose presence turns TLS on by itself.
const SSL_KEYS: [&str; 10] = [
    "sslca",
    "sslcert",
    "sslkey",
    "sslpassphrase",
    "sslpassword",
    "sslciphers",
    "sslminversion",
    "sslmaxversion",
    "sslpfx",
    "sslrejectunauthorized",
];

/// TLS options in the shape the MySQL driver expects.
///
/// MySQL has no bare `true` shape: enabling TLS without further options is
/// an empty bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MySqlTls {
    /// CA certificate (`sslca`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// Client certificate (`sslcert`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    /// Client key (`sslkey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Client key passphrase (`sslpassphrase`, or its alias `sslpassword`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    /// Whether to reject servers whose certificate fails verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_unauthorized: Option<bool>,
    /// Cipher list (`sslciphers`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciphers: Option<String>,
    /// Minimum TLS version (`sslminversion`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    /// Maximum TLS version (`sslmaxversion`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<String>,
    /// PKCS#12 bundle (`sslpfx`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfx: Option<String>,
}

pub(super) fn resolve(params: &QueryParams) -> Result<Option<TlsPolicy>, ValidationError> {
    let flag = param(params, "ssl").and_then(parse_flag);
    let has_ssl_params = SSL_KEYS.iter().any(|key| param(params, key).is_some());

    match flag {
        Some(false) if has_ssl_params => {
            Err(ValidationError::IncompatibleSslParams(Dialect::MySql))
        }
        Some(false) => Ok(None),
        Some(true) => Ok(Some(bundle(params))),
        None if has_ssl_params => Ok(Some(bundle(params))),
        None => Ok(None),
    }
}

fn bundle(params: &QueryParams) -> TlsPolicy {
    let owned = |key: &str| param(params, key).map(str::to_string);

    TlsPolicy::MySql(MySqlTls {
        ca: owned("sslca"),
        cert: owned("sslcert"),
        key: owned("sslkey"),
        passphrase: owned("sslpassphrase").or_else(|| owned("sslpassword")),
        reject_unauthorized: param(params, "sslrejectunauthorized").and_then(parse_flag),
        ciphers: owned("sslciphers"),
        min_version: owned("sslminversion"),
        max_version: owned("sslmaxversion"),
        pfx: owned("sslpfx"),
    })
}
