//! Two-threshold wet/dry classifier.
//!
//! ```text
//!            filtered < trig_wet
//!     ┌─────┐ ───────────────────▶ ┌─────┐
//!     │ Dry │                      │ Wet │
//!     └─────┘ ◀─────────────────── └─────┘
//!            filtered > trig_dry
//! ```
//!
//! Readings inside `[trig_wet, trig_dry]` never change the state when
//! `trig_dry > trig_wet`. With `trig_wet == trig_dry` there is no dead band
//! and the classifier is a single threshold: below is `Wet`, at or above
//! is `Dry`.

use serde::{Deserialize, Serialize};

/// Classified sensor state. A resistive water sensor reads *lower* when wet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WetDryState {
    Wet,
    #[default]
    Dry,
}

#[derive(Debug, Clone, Copy)]
pub struct HysteresisClassifier {
    trig_wet: f32,
    trig_dry: f32,
    single_threshold: bool,
    state: WetDryState,
}

impl HysteresisClassifier {
    /// Starts in `Dry`. Callers validate `trig_dry >= trig_wet` up front
    /// (see `ControllerConfig::validate`).
    pub fn new(trig_wet: u16, trig_dry: u16) -> Self {
        Self {
            trig_wet: trig_wet as f32,
            trig_dry: trig_dry as f32,
            single_threshold: trig_wet == trig_dry,
            state: WetDryState::Dry,
        }
    }

    /// Apply one filtered reading. Returns the new state if it flipped.
    pub fn update(&mut self, filtered: f32) -> Option<WetDryState> {
        let next = match self.state {
            WetDryState::Dry if filtered < self.trig_wet => WetDryState::Wet,
            WetDryState::Wet if self.leaves_wet(filtered) => WetDryState::Dry,
            _ => return None,
        };
        self.state = next;
        Some(next)
    }

    fn leaves_wet(&self, filtered: f32) -> bool {
        if self.single_threshold {
            filtered >= self.trig_dry
        } else {
            filtered > self.trig_dry
        }
    }

    pub fn state(&self) -> WetDryState {
        self.state
    }

    pub fn is_wet(&self) -> bool {
        self.state == WetDryState::Wet
    }
}
