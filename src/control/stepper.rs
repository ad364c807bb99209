//! Per-servo position state and the one-degree-per-tick stepper.
//!
//! An [`ActuatorChannel`] holds the last commanded angle and the desired
//! angle. [`ActuatorChannel::step`] is called once per step interval and
//! moves the commanded angle at most one degree, so angular velocity is
//! bounded by the interval and the loop never waits for the servo.

use serde::{Deserialize, Serialize};

use super::angle::Angle;
use super::hysteresis::WetDryState;
use crate::config::ChannelRole;

/// Number of servo outputs on the board.
pub const CHANNEL_COUNT: usize = 2;

/// Servo output identifier, addressed as `S1`/`S2` on the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServoChannel {
    S1,
    S2,
}

impl ServoChannel {
    pub const ALL: [ServoChannel; CHANNEL_COUNT] = [ServoChannel::S1, ServoChannel::S2];

    /// 1-based index as written on the wire (`S1` → 1).
    pub const fn number(self) -> u8 {
        match self {
            Self::S1 => 1,
            Self::S2 => 2,
        }
    }

    /// 0-based slot for per-channel arrays.
    pub const fn slot(self) -> usize {
        self.number() as usize - 1
    }
}

/// Which source currently governs a channel's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Auto,
    Manual,
}

#[derive(Debug, Clone, Copy)]
pub struct ActuatorChannel {
    id: ServoChannel,
    role: ChannelRole,
    current: Angle,
    target: Angle,
    manual_override: bool,
}

impl ActuatorChannel {
    /// Both angles start at `rest`.
    pub fn new(id: ServoChannel, role: ChannelRole, rest: Angle) -> Self {
        Self {
            id,
            role,
            current: rest,
            target: rest,
            manual_override: false,
        }
    }

    /// Re-derive the target from the sensor state, unless this channel is
    /// command-only or latched in manual mode. Returns `true` if auto mode
    /// governed the target this cycle.
    pub fn derive_target(&mut self, state: WetDryState, wet: Angle, dry: Angle) -> bool {
        if self.mode() != ControlMode::Auto {
            return false;
        }
        self.target = match state {
            WetDryState::Wet => wet,
            WetDryState::Dry => dry,
        };
        true
    }

    /// Apply an explicit angle command. Returns `true` if this latched the
    /// channel into manual mode.
    pub fn command(&mut self, angle: Angle) -> bool {
        self.target = angle;
        match self.role {
            ChannelRole::Auto { latch_manual: true } if !self.manual_override => {
                self.manual_override = true;
                true
            }
            _ => false,
        }
    }

    /// Clear a latched manual override. Returns `true` if one was set.
    pub fn release(&mut self) -> bool {
        core::mem::replace(&mut self.manual_override, false)
    }

    /// Advance one degree toward the target. Returns the new angle when the
    /// position changed, `None` when already on target.
    pub fn step(&mut self) -> Option<Angle> {
        if self.current == self.target {
            return None;
        }
        self.current = self.current.step_toward(self.target);
        Some(self.current)
    }

    pub fn mode(&self) -> ControlMode {
        match self.role {
            ChannelRole::Manual => ControlMode::Manual,
            ChannelRole::Auto { .. } if self.manual_override => ControlMode::Manual,
            ChannelRole::Auto { .. } => ControlMode::Auto,
        }
    }

    pub fn id(&self) -> ServoChannel {
        self.id
    }

    pub fn current(&self) -> Angle {
        self.current
    }

    pub fn target(&self) -> Angle {
        self.target
    }

    pub fn is_manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn at_target(&self) -> bool {
        self.current == self.target
    }
}
