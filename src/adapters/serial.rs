//! Serial command/telemetry link.
//!
//! [`SerialLink`] sits on a byte [`Transport`] and implements both
//! [`CommandSource`] (decoding `S<n>:<angle>` / `S<n>AUTO` lines, plus bare
//! `<angle>` lines when [`with_bare_angles`](SerialLink::with_bare_angles)
//! names a channel) and
//! [`EventSink`] (writing telemetry frames). Every other event goes to the
//! log console, keeping the wire format exactly the status line.
//!
//! On ESP-IDF the transport is [`UartTransport`] over UART1; the log stays
//! on UART0.

use log::{debug, warn};

use crate::app::commands::Command;
use crate::app::events::AppEvent;
use crate::app::ports::{CommandSource, EventSink};
use crate::control::ServoChannel;
use crate::protocol::{LineReader, Transport, command};

use super::log_sink::LogEventSink;

pub struct SerialLink<T> {
    transport: T,
    reader: LineReader,
    log: LogEventSink,
    bare_angle_channel: Option<ServoChannel>,
    rejected_lines: u32,
    read_errors: u32,
    write_errors: u32,
}

impl<T: Transport> SerialLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reader: LineReader::new(),
            log: LogEventSink::new(),
            bare_angle_channel: None,
            rejected_lines: 0,
            read_errors: 0,
            write_errors: 0,
        }
    }

    /// Also accept bare `<angle>` lines, addressed to `channel`.
    pub fn with_bare_angles(mut self, channel: Option<ServoChannel>) -> Self {
        self.bare_angle_channel = channel;
        self
    }

    /// Lines that framed correctly but did not parse as a command.
    pub fn rejected_lines(&self) -> u32 {
        self.rejected_lines
    }

    /// Lines lost to overflow or invalid UTF-8 before parsing.
    pub fn dropped_lines(&self) -> u32 {
        self.reader.dropped_lines()
    }

    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: Transport> CommandSource for SerialLink<T> {
    /// Reads one byte at a time so that bytes after a complete command stay
    /// in the transport for the next call.
    fn poll_command(&mut self) -> Option<Command> {
        let mut byte = [0u8; 1];
        loop {
            match self.transport.read_available(&mut byte) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    // The line in progress may be missing bytes.
                    self.reader.reset();
                    self.read_errors = self.read_errors.saturating_add(1);
                    warn!("serial: {}", e);
                    return None;
                }
            }
            let Some(line) = self.reader.feed(byte[0]) else {
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            let parsed = command::parse(&line).or_else(|| {
                self.bare_angle_channel.and_then(|ch| command::parse_bare(&line, ch))
            });
            match parsed {
                Some(cmd) => return Some(cmd),
                None => {
                    self.rejected_lines = self.rejected_lines.saturating_add(1);
                    debug!("ignored line {:?}", line.as_str());
                }
            }
        }
    }
}

impl<T: Transport> EventSink for SerialLink<T> {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Telemetry(frame) = event {
            if let Err(e) = self.transport.write_all(frame.to_line().as_bytes()) {
                self.write_errors = self.write_errors.saturating_add(1);
                warn!("telemetry: {}", e);
            }
        }
        self.log.emit(event);
    }
}

// ── UART transport (ESP-IDF) ──────────────────────────────────

#[cfg(target_os = "espidf")]
pub use uart::UartTransport;

#[cfg(target_os = "espidf")]
mod uart {
    use esp_idf_hal::delay::NON_BLOCK;
    use esp_idf_hal::sys::EspError;
    use esp_idf_hal::uart::UartDriver;

    use crate::protocol::Transport;

    /// Non-blocking [`Transport`] over an ESP-IDF UART driver.
    pub struct UartTransport<'d> {
        uart: UartDriver<'d>,
    }

    impl<'d> UartTransport<'d> {
        pub fn new(uart: UartDriver<'d>) -> Self {
            Self { uart }
        }
    }

    impl Transport for UartTransport<'_> {
        type Error = EspError;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
            self.uart.read(buf, NON_BLOCK)
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
            self.uart.write(data)
        }

        /// The driver drains its TX ring buffer in the background.
        fn flush(&mut self) -> Result<(), EspError> {
            Ok(())
        }
    }
}
