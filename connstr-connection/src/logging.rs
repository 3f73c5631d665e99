//! Logging setup.
//!
//! The library only emits [`tracing`] events. Applications that do not
//! install their own subscriber can call [`init`], which reads:
//!
//! - `CONNSTR_DEBUG=true|1|yes` - enable debug logging
//! - `CONNSTR_LOG_LEVEL=trace|debug|info|warn|error` - set the level explicitly
//! - `CONNSTR_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! Installing the subscriber requires the `tracing-subscriber` feature;
//! without it [`init`] does nothing and events reach whatever subscriber the
//! application installs itself.
//!
//! ```rust,no_run
//! use connstr_connection::logging;
//!
//! logging::init();
//! ```
//!
//! Credentials, passphrases and raw query strings are never logged.

use std::env;
use std::sync::Once;

/// Enables debug logging when truthy.
pub const DEBUG_VAR: &str = "CONNSTR_DEBUG";
/// Overrides the log level.
pub const LOG_LEVEL_VAR: &str = "CONNSTR_LOG_LEVEL";
/// Selects the output format.
pub const LOG_FORMAT_VAR: &str = "CONNSTR_LOG_FORMAT";

static INIT: Once = Once::new();

/// Whether `CONNSTR_DEBUG` is set to `true`, `1` or `yes` (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    debug_flag(env::var(DEBUG_VAR).ok().as_deref())
}

/// Configured log level. Defaults to `debug` when [`is_debug_enabled`], else `warn`.
pub fn get_log_level() -> &'static str {
    log_level(env::var(LOG_LEVEL_VAR).ok().as_deref(), is_debug_enabled())
}

/// Configured output format. Defaults to `json`.
pub fn get_log_format() -> &'static str {
    log_format(env::var(LOG_FORMAT_VAR).ok().as_deref())
}

fn debug_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

fn log_level(value: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn log_format(value: Option<&str>) -> &'static str {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Directive covering every crate of the workspace at `level`.
#[cfg(any(feature = "tracing-subscriber", test))]
fn filter_directive(level: &str) -> String {
    format!("connstr={level},connstr_uri={level},connstr_connection={level}")
}

/// Initialize logging from the environment.
///
/// Does nothing unless `CONNSTR_DEBUG` or `CONNSTR_LOG_LEVEL` is set.
/// Subsequent calls are no-ops.
pub fn init() {
    if !is_debug_enabled() && env::var(LOG_LEVEL_VAR).is_err() {
        return;
    }
    install(get_log_level(), get_log_format());
}

/// Initialize logging at `level`, ignoring `CONNSTR_DEBUG` and `CONNSTR_LOG_LEVEL`.
///
/// ```rust,no_run
/// use connstr_connection::logging;
///
/// logging::init_with_level("trace");
/// ```
pub fn init_with_level(level: &str) {
    install(log_level(Some(level), true), get_log_format());
}

/// Initialize debug logging.
pub fn init_debug() {
    install("debug", get_log_format());
}

#[cfg_attr(not(feature = "tracing-subscriber"), allow(unused_variables))]
fn install(level: &'static str, format: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(filter_directive(level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));
            let registry = tracing_subscriber::registry().with(filter);

            // another subscriber may already be installed by the host
            let installed = match format {
                "pretty" => registry.with(fmt::layer().pretty()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().json()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level, format, "connstr logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            // Tracing subscriber not available, logging will be silent
            // unless the user sets up their own subscriber
        }
    });
}
