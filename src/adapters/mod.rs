//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `hardware` | SensorPort         | ESP32 ADC1 (LDR, water)      |
//! |            | ActuatorPort       | LEDC PWM (servos), GPIO LED  |
//! | `serial`   | CommandSource      | UART1 command lines          |
//! |            | EventSink          | UART1 telemetry + log        |
//! | `log_sink` | EventSink          | Serial log output            |
//! | `time`     | ClockPort          | ESP32 system timer           |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
