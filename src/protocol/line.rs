//! Newline framing for the serial command link.
//!
//! Bytes arrive a few at a time from a non-blocking UART read. The reader
//! accumulates them and yields a complete line on `\n`. A line that would
//! exceed the buffer is discarded in full, up to and including its
//! terminator, so a burst of garbage cannot alias into a valid command.

use heapless::{String, Vec};

/// Longest accepted command line, terminator excluded.
pub const MAX_LINE_LEN: usize = 32;

pub struct LineReader<const N: usize = MAX_LINE_LEN> {
    buf: Vec<u8, N>,
    overflowed: bool,
    dropped_lines: u32,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
            dropped_lines: 0,
        }
    }

    /// Feed one byte. Returns the completed line (without `\n`) when `byte`
    /// terminates a well-formed one.
    pub fn feed(&mut self, byte: u8) -> Option<String<N>> {
        if byte != b'\n' {
            if self.buf.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        let overflowed = core::mem::replace(&mut self.overflowed, false);
        let bytes = core::mem::take(&mut self.buf);
        if overflowed {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
            return None;
        }
        match String::from_utf8(bytes) {
            Ok(line) => Some(line),
            Err(_) => {
                self.dropped_lines = self.dropped_lines.saturating_add(1);
                None
            }
        }
    }

    /// Discard any partial line, e.g. after a failed read left a gap.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    /// Lines thrown away for overflow or invalid UTF-8.
    pub fn dropped_lines(&self) -> u32 {
        self.dropped_lines
    }
}
