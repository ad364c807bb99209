//! Control primitives: sensor smoothing, wet/dry classification and servo
//! stepping. Pure logic, no I/O.

pub mod angle;
pub mod ewma;
pub mod hysteresis;
pub mod stepper;

pub use angle::Angle;
pub use ewma::EwmaFilter;
pub use hysteresis::{HysteresisClassifier, WetDryState};
pub use stepper::{ActuatorChannel, CHANNEL_COUNT, ControlMode, ServoChannel};
