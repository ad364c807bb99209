//! Serial command grammar.
//!
//! ```text
//! line    = ws* ( angle-cmd | auto-cmd ) ws*
//! angle-cmd = "S" index ":" digits        ; digits in 0..=180
//! auto-cmd  = "S" index "AUTO"
//! index   = "1" | "2"
//!
//! bare-cmd  = digits                      ; only via parse_bare
//! ```
//!
//! Matching is case-sensitive. Anything that does not fit (unknown channel,
//! out-of-range or non-numeric angle, stray characters) yields `None` and
//! the caller drops the line without a reply.

use core::fmt;

use crate::app::commands::Command;
use crate::control::{Angle, ServoChannel};

const AUTO_KEYWORD: &str = "AUTO";

/// Decode one line (terminator already stripped).
pub fn parse(line: &str) -> Option<Command> {
    let body = line.trim().strip_prefix('S')?;

    if let Some(index) = body.strip_suffix(AUTO_KEYWORD) {
        return channel(index).map(Command::Auto);
    }

    let (index, degrees) = body.split_once(':')?;
    let channel = channel(index)?;
    let angle = angle(degrees)?;
    Some(Command::SetAngle { channel, angle })
}

/// Decode a bare `<angle>` line as an angle command for `channel`.
/// Single-servo builds take this unprefixed form.
pub fn parse_bare(line: &str, channel: ServoChannel) -> Option<Command> {
    let angle = angle(line.trim())?;
    Some(Command::SetAngle { channel, angle })
}

fn angle(degrees: &str) -> Option<Angle> {
    Angle::new(u8::try_from(decimal(degrees)?).ok()?)
}

/// The index is matched literally: `"01"` is not channel 1.
fn channel(index: &str) -> Option<ServoChannel> {
    match index {
        "1" => Some(ServoChannel::S1),
        "2" => Some(ServoChannel::S2),
        _ => None,
    }
}

/// Unsigned decimal, digits only (no sign, no whitespace).
fn decimal(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 9 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Wire encoding, as a dashboard would send it (without terminator).
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetAngle { channel, angle } => write!(f, "S{}:{}", channel.number(), angle),
            Self::Auto(channel) => write!(f, "S{}{}", channel.number(), AUTO_KEYWORD),
        }
    }
}
