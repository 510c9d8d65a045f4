//! Fuzz target for the text event format parser.
//!
//! Reference files come from outside the toolkit, so parsing must reject
//! malformed input with an error and never panic.

#![no_main]

use hep_core::event_format::EventTextParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(parser) = EventTextParser::new() else {
        return;
    };
    if let Ok(events) = parser.parse(text) {
        for event in &events {
            for particle in &event.particles {
                assert_eq!(particle.event, event.id);
                let _ = particle.lineage();
            }
        }
    }
});
