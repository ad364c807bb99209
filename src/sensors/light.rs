//! Light-dependent resistor on an analog divider.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH0 via the oneshot API.
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use log::warn;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ldr_adc(raw: u16) {
    SIM_LDR_ADC.store(raw.min(super::ADC_MAX), Ordering::Relaxed);
}

pub struct LightSensor {
    _adc_gpio: i32,
    last: u16,
}

impl LightSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            last: 0,
        }
    }

    pub fn read(&mut self) -> u16 {
        match self.read_adc() {
            Ok(raw) => self.last = raw,
            Err(e) => warn!("light sensor: {} (holding {})", e, self.last),
        }
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, crate::error::SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_LDR).map(hw_init::to_10bit)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, crate::error::SensorError> {
        Ok(SIM_LDR_ADC.load(Ordering::Relaxed))
    }
}
