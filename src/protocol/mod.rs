//! Serial wire protocol: line framing, the command grammar, and the
//! telemetry frame.
//!
//! ```text
//!  host ──"S1:90\n"──▶ LineReader ──▶ command::parse ──▶ Command
//!  host ◀──"LDR:..,WATER:..,S1:..,S2:..\n"── TelemetryFrame::to_line
//! ```

pub mod command;
pub mod line;
pub mod telemetry;
pub mod transport;

pub use line::{LineReader, MAX_LINE_LEN};
pub use telemetry::TelemetryFrame;
pub use transport::Transport;
