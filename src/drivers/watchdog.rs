//! Task Watchdog Timer (TWDT) driver.
//!
//! The control loop busy-polls and never blocks, so the TWDT is
//! reconfigured to stop watching the idle tasks (which never get to run)
//! and to watch the loop task instead. The loop calls [`Watchdog::feed`]
//! once per iteration; a stall longer than the timeout panics and resets.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

/// Longest tolerated gap between two loop iterations.
pub const LOOP_TIMEOUT_MS: u32 = 2_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Self {
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                log::warn!("TWDT reconfigure returned {} (may not be initialised)", ret);
            }

            let ret = esp_task_wdt_add(core::ptr::null_mut());
            let subscribed = ret == ESP_OK;
            if subscribed {
                info!("Watchdog: loop task subscribed ({}ms, panic on trigger)", timeout_ms);
            } else {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }
            Self { subscribed }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Self {
        info!("Watchdog(sim): no-op ({}ms)", timeout_ms);
        Self {}
    }

    /// Feed the watchdog. Call once per loop iteration.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
