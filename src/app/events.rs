//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them: the serial link writes
//! telemetry frames, the log sink prints everything.

use crate::control::{Angle, ControlMode, ServoChannel, WetDryState};
use crate::protocol::TelemetryFrame;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started. Carries the initial classification.
    Started(WetDryState),

    /// Periodic status line.
    Telemetry(TelemetryFrame),

    /// The hysteresis classifier flipped.
    WetDryChanged {
        from: WetDryState,
        to: WetDryState,
        /// Filtered reading that triggered the flip.
        filtered: f32,
    },

    /// A channel entered or left manual override.
    ModeChanged {
        channel: ServoChannel,
        mode: ControlMode,
    },

    /// A command was accepted and set a new target.
    TargetSet { channel: ServoChannel, target: Angle },
}
