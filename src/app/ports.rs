//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (sensors, servos, the serial link, the clock) implement
//! these traits. The [`ControllerService`](super::service::ControllerService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Ports are infallible from the domain's point of view: a failed ADC read
//! or PWM write is handled (logged, last value held) inside the adapter.
//! The control loop has no recovery path that would do better.

use crate::app::commands::Command;
use crate::control::{Angle, ServoChannel};
use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per loop iteration.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot (10-bit counts).
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to move servos and drive the LED.
pub trait ActuatorPort {
    /// Command a servo to `angle`. Called only when the position changes.
    fn write_servo(&mut self, channel: ServoChannel, angle: Angle);

    /// Switch the light indicator. Called only when the level changes.
    fn set_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Command source (driving adapter: serial → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking source of decoded commands.
pub trait CommandSource {
    /// Next complete, valid command, or `None` if nothing is pending.
    /// Malformed input is consumed and dropped by the implementation.
    fn poll_command(&mut self) -> Option<Command>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (telemetry line on
/// the UART, log console, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter. Wraps at `u32::MAX`; consumers compare
/// with `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}
