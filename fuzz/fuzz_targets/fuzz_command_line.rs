//! Fuzz target: `LineReader::feed` → `command::parse`
//!
//! Streams arbitrary bytes through the line framer and the command parser,
//! the same path serial input takes. Asserts that no line exceeds the
//! framing limit and that every accepted command re-encodes to a line the
//! parser accepts again with the same meaning.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use dualservo::control::ServoChannel;
use dualservo::protocol::{LineReader, MAX_LINE_LEN, command};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader: LineReader = LineReader::new();

    for &byte in data {
        let Some(line) = reader.feed(byte) else {
            continue;
        };
        assert!(line.len() <= MAX_LINE_LEN, "line exceeds framing limit");

        if let Some(cmd) = command::parse(&line) {
            let wire = cmd.to_string();
            assert_eq!(command::parse(&wire), Some(cmd), "re-encoded {wire:?}");
        }
        if let Some(cmd) = command::parse_bare(&line, ServoChannel::S1) {
            assert!(command::parse(&cmd.to_string()).is_some());
        }
    }

    // Raw input straight into the parser must never panic either.
    if let Ok(text) = core::str::from_utf8(data) {
        let _ = command::parse(text);
    }
});
