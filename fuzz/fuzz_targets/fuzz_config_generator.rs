//! Fuzz target for generator.toml settings parsing.

#![no_main]

use hep_config::GeneratorSettings;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = GeneratorSettings::parse(content);
    }
});
