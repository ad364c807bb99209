//! Fuzz target: `TelemetryFrame::parse`
//!
//! Arbitrary text must never panic the monitor-side parser, and any frame
//! it accepts must render to a line that parses back to the same frame.
//!
//! cargo fuzz run fuzz_telemetry_parse

#![no_main]

use dualservo::protocol::TelemetryFrame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Some(frame) = TelemetryFrame::parse(text) {
        let line = frame.to_line();
        assert!(line.ends_with('\n'));
        assert_eq!(TelemetryFrame::parse(&line), Some(frame));
    }
});
