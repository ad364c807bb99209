//! GPIO / peripheral pin assignments for the DualServo board.
//!
//! `esp-idf-hal` hands out pins as typed peripherals (`pins.gpio9`), so
//! `main` takes them by field name. These numbers must match those fields;
//! they feed the ADC channel setup and the boot log.

// ---------------------------------------------------------------------------
// Servos (LEDC PWM, 50 Hz)
// ---------------------------------------------------------------------------

/// Servo 1 signal, sensor-driven channel.
pub const SERVO1_GPIO: i32 = 9;
/// Servo 2 signal, serial-commanded channel.
pub const SERVO2_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// Light-dependent resistor divider. ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LDR_ADC_GPIO: i32 = 1;
/// Resistive water / rain sensor. ADC1 channel 2 (GPIO 3 on ESP32-S3).
pub const WATER_ADC_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Status LED (light indicator)
// ---------------------------------------------------------------------------

pub const LED_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Command / telemetry link (UART1; UART0 carries the log console)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Baud rate the dashboard expects.
pub const UART_BAUD: u32 = 9_600;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 14-bit gives ~0.3 µs steps at 50 Hz.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Hobby servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
