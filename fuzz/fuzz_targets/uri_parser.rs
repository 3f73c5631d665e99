//! Fuzz target for the connection-string grammar.
//!
//! Feeds arbitrary strings to the parser and checks that accepted input is
//! retained verbatim and survives the fields round trip without panicking.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_uri_parser
//! ```

#![no_main]

use connstr_connection::{Dialect, build, to_fields};
use connstr_uri::parse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // The parser should never panic, only return errors
    let Ok(uri) = parse(input) else {
        return;
    };
    assert_eq!(uri.as_str(), input);

    let fields = to_fields(&uri);
    for dialect in Dialect::ALL {
        let _ = build(dialect, &fields);
    }

    let _ = uri.with_credentials(uri.username(), uri.password());
});
