//! DualServo Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single busy-polling control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter         SerialLink (UART1)     Esp32Time      │
//! │  (Sensor+Actuator)       (Commands+Telemetry)   (ClockPort)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ControllerService (pure logic)               │    │
//! │  │  EWMA · hysteresis · targets · one-degree stepping     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::info;

use dualservo::adapters::hardware::HardwareAdapter;
use dualservo::adapters::serial::{SerialLink, UartTransport};
use dualservo::adapters::time::Esp32TimeAdapter;
use dualservo::app::ports::ClockPort;
use dualservo::app::service::ControllerService;
use dualservo::config::ControllerConfig;
use dualservo::drivers::hw_init;
use dualservo::drivers::servo::ServoDriver;
use dualservo::drivers::status_led::StatusLed;
use dualservo::drivers::watchdog::{self, Watchdog};
use dualservo::pins;
use dualservo::sensors::SensorHub;
use dualservo::sensors::light::LightSensor;
use dualservo::sensors::water::WaterSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DualServo v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate()?;
    info!(
        "Config: alpha={} wet<{} dry>{} step={}ms telemetry={}ms",
        config.ewma_alpha,
        config.trig_wet,
        config.trig_dry,
        config.step_interval_ms,
        config.telemetry_interval_ms
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    hw_init::init_adc()?;

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::SERVO_PWM_FREQ_HZ))
            .resolution(Resolution::Bits14),
    )?;
    let servo1 = LedcDriver::new(peripherals.ledc.channel0, &servo_timer, peripherals.pins.gpio9)?;
    let servo2 = LedcDriver::new(peripherals.ledc.channel1, &servo_timer, peripherals.pins.gpio10)?;
    info!(
        "Servos on GPIO{}/GPIO{} ({} Hz, {}-bit)",
        pins::SERVO1_GPIO,
        pins::SERVO2_GPIO,
        pins::SERVO_PWM_FREQ_HZ,
        pins::SERVO_PWM_RESOLUTION_BITS
    );

    let indicator = match config.ldr_indicator_threshold {
        Some(threshold) => {
            info!("Indicator on GPIO{} (LDR threshold {})", pins::LED_GPIO, threshold);
            Some(StatusLed::new(PinDriver::output(peripherals.pins.gpio8)?))
        }
        None => None,
    };

    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(pins::UART_BAUD)),
    )?;
    info!(
        "Command link on UART1 (TX GPIO{}, RX GPIO{}, {} baud)",
        pins::UART_TX_GPIO,
        pins::UART_RX_GPIO,
        pins::UART_BAUD
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let sensors = SensorHub::new(
        LightSensor::new(pins::LDR_ADC_GPIO),
        WaterSensor::new(pins::WATER_ADC_GPIO),
    );
    let mut hw = HardwareAdapter::new(
        sensors,
        ServoDriver::new(servo1),
        ServoDriver::new(servo2),
        indicator,
    );
    let mut link =
        SerialLink::new(UartTransport::new(uart)).with_bare_angles(config.bare_angle_channel);
    let clock = Esp32TimeAdapter::new();

    // ── 5. Control loop ───────────────────────────────────────
    let mut service = ControllerService::new(config);
    service.start(clock.now_ms(), &mut hw, &mut link);

    let watchdog = Watchdog::new(watchdog::LOOP_TIMEOUT_MS);
    info!("System ready. Entering control loop.");

    loop {
        service.tick(clock.now_ms(), &mut hw, &mut link);
        watchdog.feed();
    }
}
