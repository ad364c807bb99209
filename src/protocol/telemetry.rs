//! Status line emitted on the serial link.
//!
//! ```text
//! LDR:<int>,WATER:<int>,S1:<int>,S2:<int>\n
//! ```
//!
//! `WATER` carries the raw (unfiltered) reading. `S1`/`S2` carry the
//! current commanded angles, not the targets.

use core::fmt::{self, Write as _};

use heapless::String;

use crate::control::Angle;

/// Room for the widest field values (`u16::MAX` readings, 180° angles).
pub const MAX_FRAME_LEN: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryFrame {
    pub ldr: u16,
    pub water: u16,
    pub s1: Angle,
    pub s2: Angle,
}

impl TelemetryFrame {
    /// Render the frame with its `\n` terminator.
    pub fn to_line(&self) -> String<MAX_FRAME_LEN> {
        let mut line = String::new();
        let written = writeln!(line, "{self}");
        // The widest rendering is 36 bytes.
        debug_assert!(written.is_ok(), "telemetry line exceeds {MAX_FRAME_LEN} bytes");
        line
    }

    /// Parse a received status line. All four keys must be present; keys
    /// may appear in any order and unknown keys are skipped.
    pub fn parse(line: &str) -> Option<Self> {
        let (mut ldr, mut water, mut s1, mut s2) = (None, None, None, None);

        for pair in line.trim().split(',') {
            let (key, value) = pair.split_once(':')?;
            let value = value.trim();
            match key.trim() {
                "LDR" => ldr = Some(value.parse::<u16>().ok()?),
                "WATER" => water = Some(value.parse::<u16>().ok()?),
                "S1" => s1 = Some(value.parse::<u8>().ok().and_then(Angle::new)?),
                "S2" => s2 = Some(value.parse::<u8>().ok().and_then(Angle::new)?),
                _ => {}
            }
        }

        Some(Self {
            ldr: ldr?,
            water: water?,
            s1: s1?,
            s2: s2?,
        })
    }
}

impl fmt::Display for TelemetryFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LDR:{},WATER:{},S1:{},S2:{}",
            self.ldr, self.water, self.s1, self.s2
        )
    }
}
