//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control rules for the servo controller:
//! water filtering, wet/dry classification, per-channel target selection,
//! and timed stepping. All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
