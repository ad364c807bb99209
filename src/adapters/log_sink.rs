//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on UART0 in production). The
//! serial command link forwards everything except telemetry here.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                debug!(
                    "TELEM | ldr={} water={} | S1={}\u{00b0} S2={}\u{00b0}",
                    t.ldr, t.water, t.s1, t.s2
                );
            }
            AppEvent::WetDryChanged { from, to, filtered } => {
                info!("STATE | {:?} -> {:?} (filtered {:.1})", from, to, filtered);
            }
            AppEvent::ModeChanged { channel, mode } => {
                info!("MODE  | {:?} -> {:?}", channel, mode);
            }
            AppEvent::TargetSet { channel, target } => {
                debug!("CMD   | {:?} target {}\u{00b0}", channel, target);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
