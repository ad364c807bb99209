//! Hobby servo on a 50 Hz PWM channel.
//!
//! Maps 0–180° onto a 500–2500 µs pulse inside the 20 ms frame. The driver
//! is generic over [`SetDutyCycle`], so on target it wraps an `esp-idf-hal`
//! `LedcDriver` and on host any mock PWM.
//!
//! The driver moves the horn straight to whatever it is told; ramping is
//! the stepper's job.

use embedded_hal::pwm::SetDutyCycle;

use crate::control::Angle;
use crate::error::ActuatorError;

/// Pulse width at 0°.
const MIN_PULSE_US: u32 = 500;
/// Pulse width at 180°.
const MAX_PULSE_US: u32 = 2500;
/// 50 Hz frame.
const PERIOD_US: u32 = 20_000;

pub struct ServoDriver<P> {
    pwm: P,
    max_duty: u32,
    last: Option<Angle>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        let max_duty = pwm.max_duty_cycle() as u32;
        Self {
            pwm,
            max_duty,
            last: None,
        }
    }

    pub fn set_angle(&mut self, angle: Angle) -> Result<(), ActuatorError> {
        let duty = self.angle_to_duty(angle);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.last = Some(angle);
        Ok(())
    }

    /// Last angle successfully written.
    pub fn last_angle(&self) -> Option<Angle> {
        self.last
    }

    fn angle_to_duty(&self, angle: Angle) -> u16 {
        let deg = angle.degrees() as u32;
        let pulse_us = MIN_PULSE_US + deg * (MAX_PULSE_US - MIN_PULSE_US) / 180;
        (pulse_us * self.max_duty / PERIOD_US) as u16
    }
}
