//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`], both servo drivers, and the optional light
//! indicator, exposing them through [`SensorPort`] and [`ActuatorPort`].
//! This is the only module in the system that touches actual hardware.
//! On non-espidf targets, the sensors read simulation statics and the PWM
//! and GPIO handles are whatever mocks the caller supplies.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::{Angle, CHANNEL_COUNT, ServoChannel};
use crate::drivers::servo::ServoDriver;
use crate::drivers::status_led::StatusLed;
use crate::sensors::{SensorHub, SensorSnapshot};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, L> {
    sensor_hub: SensorHub,
    servos: [ServoDriver<P>; CHANNEL_COUNT],
    indicator: Option<StatusLed<L>>,
}

impl<P: SetDutyCycle, L: OutputPin> HardwareAdapter<P, L> {
    pub fn new(
        sensor_hub: SensorHub,
        servo1: ServoDriver<P>,
        servo2: ServoDriver<P>,
        indicator: Option<StatusLed<L>>,
    ) -> Self {
        Self {
            sensor_hub,
            servos: [servo1, servo2],
            indicator,
        }
    }

    pub fn servo(&self, channel: ServoChannel) -> &ServoDriver<P> {
        &self.servos[channel.slot()]
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, L> SensorPort for HardwareAdapter<P, L> {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: SetDutyCycle, L: OutputPin> ActuatorPort for HardwareAdapter<P, L> {
    fn write_servo(&mut self, channel: ServoChannel, angle: Angle) {
        if let Err(e) = self.servos[channel.slot()].set_angle(angle) {
            warn!("{:?} -> {}: {}", channel, angle, e);
        }
    }

    fn set_indicator(&mut self, on: bool) {
        if let Some(led) = self.indicator.as_mut() {
            if let Err(e) = led.set(on) {
                warn!("indicator: {}", e);
            }
        }
    }
}
