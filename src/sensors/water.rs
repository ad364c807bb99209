//! Resistive water / rain sensor.
//!
//! The exposed traces pull the divider down when bridged by water, so a
//! *lower* reading means wetter. Smoothing and classification happen in
//! `control`; this driver only produces 10-bit samples.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH2 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use log::warn;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Dry sensor reads near full scale.
static SIM_WATER_ADC: AtomicU16 = AtomicU16::new(1023);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_water_adc(raw: u16) {
    SIM_WATER_ADC.store(raw.min(super::ADC_MAX), Ordering::Relaxed);
}

pub struct WaterSensor {
    _adc_gpio: i32,
    last: u16,
    failed_reads: u32,
}

impl WaterSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            last: super::ADC_MAX,
            failed_reads: 0,
        }
    }

    /// Sample the sensor. A failed conversion repeats the previous value;
    /// the hardware boundary always yields a number.
    pub fn read(&mut self) -> u16 {
        match self.read_adc() {
            Ok(raw) => self.last = raw,
            Err(e) => {
                self.failed_reads = self.failed_reads.saturating_add(1);
                warn!("water sensor: {} (holding {})", e, self.last);
            }
        }
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, crate::error::SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_WATER).map(hw_init::to_10bit)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, crate::error::SensorError> {
        Ok(SIM_WATER_ADC.load(Ordering::Relaxed))
    }

    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}
