//! Semantic connection fields and the canonical connection-string builder.

use crate::Dialect;
use connstr_uri::ParsedUri;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A port, either numeric or as the text a user typed.
///
/// Deserializes from a number or a string. Numbers outside the `u16` range
/// are kept as [`Port::Text`], the same way out-of-range ports in a parsed
/// connection string are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Port {
    /// Numeric port.
    Number(u16),
    /// Preformatted port text.
    Text(String),
}

impl Port {
    /// Numeric value, if the port is a valid `u16`.
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Port {
    /// Text that parses as a `u16` is written in canonical decimal; other
    /// text is written trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => match s.trim().parse::<u16>() {
                Ok(n) => write!(f, "{n}"),
                Err(_) => f.write_str(s.trim()),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Port {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PortVisitor;

        impl Visitor<'_> for PortVisitor {
            type Value = Port;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a port number or port text")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Port, E> {
                Ok(u16::try_from(v).map_or_else(|_| Port::Text(v.to_string()), Port::Number))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Port, E> {
                Ok(u16::try_from(v).map_or_else(|_| Port::Text(v.to_string()), Port::Number))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Port, E> {
                Ok(Port::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Port, E> {
                Ok(Port::Text(v))
            }
        }

        deserializer.deserialize_any(PortVisitor)
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Number(port)
    }
}

impl From<&str> for Port {
    fn from(port: &str) -> Self {
        Self::Text(port.to_string())
    }
}

impl From<String> for Port {
    fn from(port: String) -> Self {
        Self::Text(port)
    }
}

/// Editable connection fields.
///
/// Produced from a parsed connection string by [`ConnectionFields::from_uri`]
/// and turned back into one by [`ConnectionFields::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionFields {
    /// Host name or address. Empty means the fields are not buildable.
    pub host: String,
    /// Port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,
    /// Username, as written in the connection string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Password, as written in the connection string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Database name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Raw query string, with or without a leading `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl ConnectionFields {
    /// Create fields for a host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Set the port.
    pub fn port(mut self, port: impl Into<Port>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the username.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the database.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the raw query options.
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Extract fields from a parsed connection string.
    ///
    /// Credentials are taken verbatim (still percent-encoded) and the query is
    /// carried over undecoded, so canonical strings rebuild byte for byte.
    pub fn from_uri(uri: &ParsedUri) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        let port = non_empty(uri.port()).map(|raw| match raw.parse::<u16>() {
            Ok(n) => Port::Number(n),
            Err(_) => Port::Text(raw),
        });

        Self {
            host: uri.host().to_string(),
            port,
            user: non_empty(uri.username()),
            password: non_empty(uri.password()),
            database: uri.database().map(str::to_string),
            options: non_empty(uri.query()),
        }
    }

    /// Build a canonical connection string for `dialect`.
    ///
    /// Returns an empty string when `host` is empty; callers must treat that
    /// as "not buildable". ClickHouse strings never carry a database segment.
    ///
    /// ```rust
    /// use connstr_connection::{ConnectionFields, Dialect};
    ///
    /// let fields = ConnectionFields::new("localhost")
    ///     .port(5432)
    ///     .user("user")
    ///     .database("mydb")
    ///     .options("?sslmode=require");
    /// assert_eq!(
    ///     fields.build(Dialect::Postgres),
    ///     "postgresql://user@localhost:5432/mydb?sslmode=require"
    /// );
    /// ```
    pub fn build(&self, dialect: Dialect) -> String {
        if self.host.is_empty() {
            debug!(dialect = %dialect, "No host, connection string not buildable");
            return String::new();
        }

        let mut url = format!("{}://", dialect.protocol());

        if let Some(user) = self.user.as_deref().filter(|u| !u.is_empty()) {
            url.push_str(user);
            if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
                url.push(':');
                url.push_str(password);
            }
            url.push('@');
        }

        url.push_str(&self.host);

        if let Some(port) = &self.port {
            let port = port.to_string();
            if !port.is_empty() {
                url.push(':');
                url.push_str(&port);
            }
        }

        if dialect != Dialect::ClickHouse {
            if let Some(database) = self.database.as_deref().filter(|d| !d.is_empty()) {
                url.push('/');
                url.push_str(database);
            }
        }

        if let Some(options) = self.options.as_deref().map(str::trim) {
            if !options.is_empty() {
                if !options.starts_with('?') {
                    url.push('?');
                }
                url.push_str(options);
            }
        }

        debug!(dialect = %dialect, host = %self.host, "Connection string built");
        url
    }
}

impl From<&ParsedUri> for ConnectionFields {
    fn from(uri: &ParsedUri) -> Self {
        Self::from_uri(uri)
    }
}

/// Extract fields from a parsed connection string.
pub fn to_fields(uri: &ParsedUri) -> ConnectionFields {
    ConnectionFields::from_uri(uri)
}

/// Build a canonical connection string. Empty when `fields.host` is empty.
pub fn build(dialect: Dialect, fields: &ConnectionFields) -> String {
    fields.build(dialect)
}
