//! Application service: the hexagonal core.
//!
//! [`ControllerService`] owns the sensor filter, the wet/dry classifier,
//! both servo channels, and the loop's timing gates. All I/O flows through
//! port traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │    ControllerService      │
//! ActuatorPort ◀──│ EWMA · hysteresis · step  │ ◀── CommandSource
//!                 └──────────────────────────┘
//! ```
//!
//! One [`tick`](ControllerService::tick) runs, in order:
//! sample (+ indicator) → filter → classify → derive auto targets →
//! drain commands → (step gate) advance servos → (telemetry gate) emit.
//! Auto derivation precedes commands, so a latchless channel honours an
//! explicit angle for the remainder of that cycle only.

use log::{debug, info};

use crate::config::ControllerConfig;
use crate::control::{
    ActuatorChannel, CHANNEL_COUNT, ControlMode, EwmaFilter, HysteresisClassifier, ServoChannel,
    WetDryState,
};
use crate::protocol::TelemetryFrame;
use crate::scheduler::Scheduler;
use crate::sensors::SensorSnapshot;

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{ActuatorPort, CommandSource, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

/// The controller service orchestrates all domain logic.
pub struct ControllerService {
    config: ControllerConfig,
    filter: EwmaFilter,
    classifier: HysteresisClassifier,
    channels: [ActuatorChannel; CHANNEL_COUNT],
    scheduler: Scheduler,
    /// Latest raw readings (telemetry reports these, not the filtered value).
    snapshot: SensorSnapshot,
    /// Last level written to the indicator. `None` until the first write.
    indicator: Option<bool>,
    tick_count: u64,
}

impl ControllerService {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Self {
        let channels = ServoChannel::ALL.map(|id| {
            let ch = config.channel(id);
            ActuatorChannel::new(id, ch.role, ch.rest_angle)
        });

        Self {
            filter: EwmaFilter::new(config.ewma_alpha),
            classifier: HysteresisClassifier::new(config.trig_wet, config.trig_dry),
            channels,
            scheduler: Scheduler::new(config.step_interval_ms, config.telemetry_interval_ms, 0),
            snapshot: SensorSnapshot::default(),
            indicator: None,
            tick_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Take an initial reading, seed the filter with it, and drive both
    /// servos to their rest angles. Timing gates start from `now_ms`.
    pub fn start(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.snapshot = hw.read_all();
        self.filter.seed(self.config.sensor_source.select(&self.snapshot));

        for ch in &self.channels {
            hw.write_servo(ch.id(), ch.current());
        }
        self.scheduler.reset(now_ms);

        let state = self.classifier.state();
        sink.emit(&AppEvent::Started(state));
        info!(
            "ControllerService started: source={:?} S1={} S2={}",
            self.config.sensor_source,
            self.channels[ServoChannel::S1.slot()].current(),
            self.channels[ServoChannel::S2.slot()].current()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one loop iteration. Never blocks.
    ///
    /// `hw` satisfies **both** [`SensorPort`] and [`ActuatorPort`], and
    /// `link` both [`CommandSource`] and [`EventSink`], so each is a single
    /// mutable borrow.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort),
        link: &mut (impl CommandSource + EventSink),
    ) {
        self.tick_count += 1;

        // 1. Sample, and follow the light level on the indicator
        self.snapshot = hw.read_all();
        self.update_indicator(hw);

        // 2. Filter
        let input = self.config.sensor_source.select(&self.snapshot);
        let filtered = self.filter.update(input);

        // 3. Classify (every cycle, regardless of channel modes)
        let prev = self.classifier.state();
        if let Some(to) = self.classifier.update(filtered) {
            link.emit(&AppEvent::WetDryChanged {
                from: prev,
                to,
                filtered,
            });
        }

        // 4. Auto targets
        let state = self.classifier.state();
        for ch in &mut self.channels {
            ch.derive_target(state, self.config.wet_angle, self.config.dry_angle);
        }

        // 5. Commands
        while let Some(cmd) = link.poll_command() {
            if self.config.accept_commands {
                self.handle_command(cmd, link);
            } else {
                debug!("Command intake disabled, dropped {:?}", cmd);
            }
        }

        // 6/7. Timed work
        let due = self.scheduler.poll(now_ms);
        if due.step {
            for ch in &mut self.channels {
                if let Some(angle) = ch.step() {
                    hw.write_servo(ch.id(), angle);
                }
            }
        }
        if due.telemetry {
            link.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply one decoded command. Ignores [`ControllerConfig::accept_commands`];
    /// the gate lives in [`tick`](Self::tick).
    pub fn handle_command(&mut self, cmd: Command, sink: &mut impl EventSink) {
        match cmd {
            Command::SetAngle { channel, angle } => {
                let ch = &mut self.channels[channel.slot()];
                let latched = ch.command(angle);
                sink.emit(&AppEvent::TargetSet {
                    channel,
                    target: angle,
                });
                if latched {
                    sink.emit(&AppEvent::ModeChanged {
                        channel,
                        mode: ControlMode::Manual,
                    });
                }
            }
            Command::Auto(channel) => {
                if self.channels[channel.slot()].release() {
                    sink.emit(&AppEvent::ModeChanged {
                        channel,
                        mode: ControlMode::Auto,
                    });
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Status line for the current cycle: raw readings and current angles.
    pub fn build_telemetry(&self) -> TelemetryFrame {
        TelemetryFrame {
            ldr: self.snapshot.ldr_raw,
            water: self.snapshot.water_raw,
            s1: self.channels[ServoChannel::S1.slot()].current(),
            s2: self.channels[ServoChannel::S2.slot()].current(),
        }
    }

    pub fn channel(&self, id: ServoChannel) -> &ActuatorChannel {
        &self.channels[id.slot()]
    }

    pub fn wet_dry(&self) -> WetDryState {
        self.classifier.state()
    }

    /// Current filtered classifier input (`None` before the first reading).
    pub fn filtered_water(&self) -> Option<f32> {
        self.filter.value()
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
    }

    pub fn indicator(&self) -> Option<bool> {
        self.indicator
    }

    /// Total loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn update_indicator(&mut self, hw: &mut impl ActuatorPort) {
        let Some(on) = self.config.indicator_level(self.snapshot.ldr_raw) else {
            return;
        };
        if self.indicator != Some(on) {
            hw.set_indicator(on);
            self.indicator = Some(on);
        }
    }
}
