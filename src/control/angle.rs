//! Servo angle in whole degrees.
//!
//! The [0, 180] range is enforced at construction, so everything past the
//! command-parsing boundary can rely on it without re-checking.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A hobby-servo position in degrees, always within `0..=180`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Angle(u8);

impl Angle {
    pub const MIN: Angle = Angle(0);
    pub const MAX: Angle = Angle(180);

    /// Returns `None` if `degrees` is outside `0..=180`.
    pub const fn new(degrees: u8) -> Option<Self> {
        if degrees <= Self::MAX.0 {
            Some(Self(degrees))
        } else {
            None
        }
    }

    /// Saturating constructor for compile-time presets.
    pub const fn clamped(degrees: u8) -> Self {
        if degrees > Self::MAX.0 { Self::MAX } else { Self(degrees) }
    }

    pub const fn degrees(self) -> u8 {
        self.0
    }

    /// One degree closer to `target`, or `self` when already there.
    pub fn step_toward(self, target: Angle) -> Angle {
        match self.0.cmp(&target.0) {
            core::cmp::Ordering::Less => Angle(self.0 + 1),
            core::cmp::Ordering::Greater => Angle(self.0 - 1),
            core::cmp::Ordering::Equal => self,
        }
    }

    /// Absolute distance in degrees.
    pub fn distance(self, other: Angle) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<u8> for Angle {
    type Error = &'static str;

    fn try_from(degrees: u8) -> Result<Self, Self::Error> {
        Self::new(degrees).ok_or("angle must be within 0..=180")
    }
}

impl From<Angle> for u8 {
    fn from(a: Angle) -> u8 {
        a.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
