//! Mock adapters for integration tests.
//!
//! `MockHardware` records every actuator call so tests can assert on the
//! full command history without touching real PWM/GPIO. `MockLink` feeds
//! command lines through the real parser and records emitted events.
//! `PipeTransport` is an in-memory byte link for driving `SerialLink`.

use std::collections::VecDeque;

use dualservo::app::commands::Command;
use dualservo::app::events::AppEvent;
use dualservo::app::ports::{ActuatorPort, CommandSource, EventSink, SensorPort};
use dualservo::control::{Angle, ServoChannel};
use dualservo::protocol::{TelemetryFrame, Transport, command};
use dualservo::sensors::SensorSnapshot;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Servo { channel: ServoChannel, degrees: u8 },
    Indicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub ldr: u16,
    pub water: u16,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(ldr: u16, water: u16) -> Self {
        Self {
            ldr,
            water,
            calls: Vec::new(),
        }
    }

    /// Every angle written to `channel`, in order.
    pub fn servo_writes(&self, channel: ServoChannel) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                ActuatorCall::Servo { channel: ch, degrees } if ch == channel => Some(degrees),
                _ => None,
            })
            .collect()
    }

    pub fn indicator_writes(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                ActuatorCall::Indicator(on) => Some(on),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            ldr_raw: self.ldr,
            water_raw: self.water,
        }
    }
}

impl ActuatorPort for MockHardware {
    fn write_servo(&mut self, channel: ServoChannel, angle: Angle) {
        self.calls.push(ActuatorCall::Servo {
            channel,
            degrees: angle.degrees(),
        });
    }

    fn set_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Indicator(on));
    }
}

// ── MockLink ──────────────────────────────────────────────────

/// Command source fed with text lines; event sink that keeps everything.
#[derive(Default)]
pub struct MockLink {
    inbox: VecDeque<Command>,
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line as if received on the wire. Lines the parser rejects
    /// never reach the controller, exactly as on the real link.
    pub fn send(&mut self, line: &str) {
        if let Some(cmd) = command::parse(line) {
            self.inbox.push_back(cmd);
        }
    }

    pub fn telemetry(&self) -> Vec<TelemetryFrame> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(f) => Some(*f),
                _ => None,
            })
            .collect()
    }
}

impl CommandSource for MockLink {
    fn poll_command(&mut self) -> Option<Command> {
        self.inbox.pop_front()
    }
}

impl EventSink for MockLink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── PipeTransport ─────────────────────────────────────────────

#[derive(Default)]
pub struct PipeTransport {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
}

#[allow(dead_code)]
impl PipeTransport {
    pub fn push(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Everything written so far, split into lines (terminators removed).
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.tx)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Transport for PipeTransport {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}
