//! Inbound commands to the controller service.
//!
//! Decoded from the serial link by [`crate::protocol::command::parse`];
//! the [`ControllerService`](super::service::ControllerService) applies them.

use crate::control::{Angle, ServoChannel};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `S<n>:<angle>`: set a channel's target. On a latching auto channel
    /// this also engages manual override.
    SetAngle { channel: ServoChannel, angle: Angle },

    /// `S<n>AUTO`: drop a latched manual override so the sensor drives the
    /// channel again from the next cycle.
    Auto(ServoChannel),
}
