//! Actuator drivers, hardware initialisation, and the loop watchdog.

pub mod hw_init;
pub mod servo;
pub mod status_led;
pub mod watchdog;
