//! Fuzz target for process.json descriptor parsing.

#![no_main]

use hep_config::ProcessDescriptor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        let _ = ProcessDescriptor::parse(json);
    }
});
