//! Fuzz target for TLS policy resolution.
//!
//! Builds query strings from structured input so the recognized `ssl*` keys
//! are hit often, and checks resolution is total and deterministic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_tls_resolver
//! ```

#![no_main]

use arbitrary::Arbitrary;
use connstr_connection::{Dialect, resolve};
use connstr_uri::QueryParams;
use libfuzzer_sys::fuzz_target;

const KEYS: &[&str] = &[
    "ssl",
    "sslmode",
    "sslcert",
    "sslkey",
    "sslrootcert",
    "sslpassword",
    "sslservername",
    "sslca",
    "sslpassphrase",
    "sslrejectunauthorized",
    "sslciphers",
    "sslminversion",
    "sslmaxversion",
    "sslpfx",
];

const VALUES: &[&str] = &[
    "", "0", "1", "true", "false", "TRUE", "disable", "prefer", "require", "no-verify", "verify",
    "verify-ca", "verify-full", "/path/to/cert.pem",
];

#[derive(Debug, Arbitrary)]
struct Param {
    key: u8,
    value: u8,
    raw: Option<String>,
}

fuzz_target!(|input: (Vec<Param>, String)| {
    let (params, raw_query) = input;

    let query: QueryParams = params
        .iter()
        .map(|p| {
            let key = KEYS[p.key as usize % KEYS.len()];
            let value = p
                .raw
                .clone()
                .unwrap_or_else(|| VALUES[p.value as usize % VALUES.len()].to_string());
            (key, value)
        })
        .collect();

    let raw = QueryParams::parse(&raw_query);

    for dialect in Dialect::ALL {
        assert_eq!(resolve(dialect, &query), resolve(dialect, &query));
        let _ = resolve(dialect, &raw);
    }
});
