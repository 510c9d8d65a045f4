//! Fuzz target for particles.json catalog parsing.
//!
//! Tests that field-by-field catalog checking handles arbitrary input
//! without panicking.

#![no_main]

use hep_config::catalog::parse_catalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        let _ = parse_catalog(json);
    }
});
