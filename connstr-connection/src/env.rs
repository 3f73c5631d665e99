//! Environment lookup for connection strings.

use crate::{ConnectionError, ConnectionResult};
use std::collections::HashMap;

/// Variable read by [`ConnectionConfig::from_database_url`](crate::ConnectionConfig::from_database_url).
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Source of environment variables.
pub trait EnvSource: Send + Sync {
    /// Get a variable's value.
    fn get(&self, name: &str) -> Option<String>;

    /// Get a variable that must be set to a non-blank value.
    fn require(&self, name: &str) -> ConnectionResult<String> {
        self.get(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConnectionError::EnvNotFound(name.to_string()))
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
