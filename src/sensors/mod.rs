//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! loop iteration.

pub mod light;
pub mod water;

use light::LightSensor;
use water::WaterSensor;

/// Full scale of every analog reading the controller works with.
pub const ADC_MAX: u16 = 1023;

/// A point-in-time snapshot of every sensor, 10-bit raw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Light-dependent resistor. Higher = brighter.
    pub ldr_raw: u16,
    /// Water / rain sensor. Lower = wetter.
    pub water_raw: u16,
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub light: LightSensor,
    pub water: WaterSensor,
}

impl SensorHub {
    /// Drivers are built in main, where peripheral ownership is established.
    pub fn new(light: LightSensor, water: WaterSensor) -> Self {
        Self { light, water }
    }

    pub fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            ldr_raw: self.light.read(),
            water_raw: self.water.read(),
        }
    }
}
