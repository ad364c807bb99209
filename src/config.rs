//! Controller configuration parameters
//!
//! All tunable parameters for the servo controller. Each deployed board
//! variant is captured as a [`Profile`]; `ControllerConfig::default()` is
//! the dual-servo board with a latching manual override on servo 1.

use serde::{Deserialize, Serialize};

use crate::control::{Angle, CHANNEL_COUNT, ServoChannel};
use crate::error::{Error, Result};
use crate::sensors::{ADC_MAX, SensorSnapshot};

/// Which analog input feeds the filter and the wet/dry classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorSource {
    /// Water sensor as read: lower is wetter.
    #[default]
    Water,
    /// LDR, inverted (`ADC_MAX - raw`) so that a reading above the
    /// thresholds' mirror image classifies as `Wet`, the active state.
    Light,
}

impl SensorSource {
    /// The classifier input for one snapshot.
    pub fn select(self, snapshot: &SensorSnapshot) -> u16 {
        match self {
            Self::Water => snapshot.water_raw,
            Self::Light => ADC_MAX.saturating_sub(snapshot.ldr_raw),
        }
    }
}

/// How a servo channel picks its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelRole {
    /// Target comes only from serial commands.
    Manual,
    /// Target follows the wet/dry state. With `latch_manual`, an explicit
    /// angle command suspends this until `S<n>AUTO`; without it, a command
    /// holds only until the next cycle re-derives the target.
    Auto { latch_manual: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub role: ChannelRole,
    /// Position commanded at boot.
    pub rest_angle: Angle,
}

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Classified sensor ---
    #[serde(default)]
    pub sensor_source: SensorSource,
    /// EWMA smoothing factor, `(0, 1]`. Lower = heavier smoothing.
    pub ewma_alpha: f32,
    /// Filtered reading below this flips Dry → Wet.
    pub trig_wet: u16,
    /// Filtered reading above this flips Wet → Dry. Must be ≥ `trig_wet`;
    /// equal to it means a single threshold with no dead band.
    pub trig_dry: u16,

    // --- Auto targets ---
    pub wet_angle: Angle,
    pub dry_angle: Angle,

    // --- Channels (S1, S2) ---
    pub channels: [ChannelConfig; CHANNEL_COUNT],

    // --- Light indicator ---
    /// LED on while the LDR reads above this. `None` = no indicator.
    pub ldr_indicator_threshold: Option<u16>,
    /// Light the LED at or below the threshold instead.
    #[serde(default)]
    pub indicator_inverted: bool,

    // --- Serial link ---
    /// Whether command lines are parsed at all.
    pub accept_commands: bool,
    /// Channel addressed by a bare `<angle>` line. `None` = prefix required.
    #[serde(default)]
    pub bare_angle_channel: Option<ServoChannel>,

    // --- Timing ---
    /// Milliseconds per one-degree servo step.
    pub step_interval_ms: u32,
    /// Telemetry line period (milliseconds).
    pub telemetry_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Profile::DualServo.config()
    }
}

impl ControllerConfig {
    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if !(self.ewma_alpha.is_finite() && self.ewma_alpha > 0.0 && self.ewma_alpha <= 1.0) {
            return Err(Error::Config("ewma_alpha must be within (0, 1]"));
        }
        if self.trig_dry < self.trig_wet {
            return Err(Error::Config("trig_dry must not be below trig_wet"));
        }
        if self.trig_dry > ADC_MAX {
            return Err(Error::Config("trig_dry exceeds ADC range"));
        }
        if self.ldr_indicator_threshold.is_some_and(|t| t > ADC_MAX) {
            return Err(Error::Config("ldr_indicator_threshold exceeds ADC range"));
        }
        if self.step_interval_ms == 0 {
            return Err(Error::Config("step_interval_ms must be non-zero"));
        }
        if self.telemetry_interval_ms == 0 {
            return Err(Error::Config("telemetry_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed config JSON"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn channel(&self, id: ServoChannel) -> &ChannelConfig {
        &self.channels[id.slot()]
    }

    /// Indicator level for an LDR reading, `None` without an indicator.
    pub fn indicator_level(&self, ldr_raw: u16) -> Option<bool> {
        self.ldr_indicator_threshold
            .map(|t| (ldr_raw > t) != self.indicator_inverted)
    }
}

/// Known board builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    /// Water-following servo 1 with latching manual override, commanded
    /// servo 2, LDR indicator.
    DualServo,
    /// As `DualServo`, but servo 1 commands only hold until the next cycle.
    DualServoLatchless,
    /// Single hand-spray servo driven by the water sensor; no serial control.
    HandSpray,
    /// Rain cover: single 800 threshold, no filtering, closes to 0° in
    /// rain and opens to 90° otherwise.
    RainCover,
    /// Light-driven door: LDR above 500 closes to 0°, otherwise opens to
    /// 180° with the LED lit.
    LightDoor,
    /// One serial-commanded servo taking bare `<angle>` lines, 10 ms steps.
    Motor,
}

impl Profile {
    pub fn config(self) -> ControllerConfig {
        let deg = Angle::clamped;
        let commanded = ChannelConfig {
            role: ChannelRole::Manual,
            rest_angle: deg(0),
        };
        let following = ChannelConfig {
            role: ChannelRole::Auto {
                latch_manual: false,
            },
            rest_angle: deg(0),
        };
        match self {
            Self::DualServo | Self::DualServoLatchless => ControllerConfig {
                sensor_source: SensorSource::Water,
                ewma_alpha: 0.2,
                trig_wet: 780,
                trig_dry: 820,
                wet_angle: deg(45),
                dry_angle: deg(0),
                channels: [
                    ChannelConfig {
                        role: ChannelRole::Auto {
                            latch_manual: self == Self::DualServo,
                        },
                        rest_angle: deg(0),
                    },
                    commanded,
                ],
                ldr_indicator_threshold: Some(500),
                indicator_inverted: false,
                accept_commands: true,
                bare_angle_channel: None,
                step_interval_ms: 15,
                telemetry_interval_ms: 200, // ~5 Hz
            },
            Self::HandSpray => ControllerConfig {
                sensor_source: SensorSource::Water,
                ewma_alpha: 0.2,
                trig_wet: 780,
                trig_dry: 820,
                wet_angle: deg(45),
                dry_angle: deg(0),
                channels: [following, commanded],
                ldr_indicator_threshold: None,
                indicator_inverted: false,
                accept_commands: false,
                bare_angle_channel: None,
                step_interval_ms: 15,
                telemetry_interval_ms: 200,
            },
            Self::RainCover => ControllerConfig {
                sensor_source: SensorSource::Water,
                ewma_alpha: 1.0,
                trig_wet: 800,
                trig_dry: 800,
                wet_angle: deg(0),
                dry_angle: deg(90),
                channels: [following, commanded],
                ldr_indicator_threshold: Some(500),
                indicator_inverted: false,
                accept_commands: true,
                bare_angle_channel: None,
                step_interval_ms: 10,
                telemetry_interval_ms: 200,
            },
            Self::LightDoor => ControllerConfig {
                sensor_source: SensorSource::Light,
                ewma_alpha: 1.0,
                // Mirror of LDR 500: inverted reading < 523 <=> LDR > 500.
                trig_wet: ADC_MAX - 500,
                trig_dry: ADC_MAX - 500,
                wet_angle: deg(0),
                dry_angle: deg(180),
                channels: [following, commanded],
                ldr_indicator_threshold: Some(500),
                indicator_inverted: true,
                accept_commands: false,
                bare_angle_channel: None,
                step_interval_ms: 15,
                telemetry_interval_ms: 500,
            },
            Self::Motor => ControllerConfig {
                sensor_source: SensorSource::Water,
                ewma_alpha: 0.2,
                trig_wet: 780,
                trig_dry: 820,
                wet_angle: deg(45),
                dry_angle: deg(0),
                channels: [commanded, commanded],
                ldr_indicator_threshold: None,
                indicator_inverted: false,
                accept_commands: true,
                bare_angle_channel: Some(ServoChannel::S1),
                step_interval_ms: 10,
                telemetry_interval_ms: 200,
            },
        }
    }
}
