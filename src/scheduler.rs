//! Timestamp-gated periodic tasks.
//!
//! The control loop never sleeps. Each iteration asks the [`Scheduler`]
//! which of its gates have elapsed against a monotonically increasing,
//! wrapping millisecond counter.
//!
//! ```text
//!  loop ──▶ sample · filter · classify · commands
//!             │
//!             ▼
//!       Scheduler::poll(now_ms)
//!        ├─ step gate (15 ms)      ──▶ advance servos one degree
//!        └─ telemetry gate (200 ms) ──▶ emit status line
//! ```

use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Interval gate
// ═══════════════════════════════════════════════════════════════

/// Fires at most once per `interval_ms`.
///
/// Elapsed time is computed with `wrapping_sub`, so a `u32` millisecond
/// counter rolling over (every ~49.7 days) does not stall the gate.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_ms: u32,
}

impl IntervalTimer {
    /// The first fire happens one full interval after `start_ms`.
    pub fn new(interval_ms: u32, start_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: start_ms,
        }
    }

    /// Returns `true` and records `now_ms` when the interval has elapsed.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Restart the interval from `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

/// Which gates fired on one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueTasks {
    pub step: bool,
    pub telemetry: bool,
}

/// The controller's two independent cadences.
pub struct Scheduler {
    step: IntervalTimer,
    telemetry: IntervalTimer,
}

impl Scheduler {
    pub fn new(step_interval_ms: u32, telemetry_interval_ms: u32, start_ms: u32) -> Self {
        debug!(
            "Scheduler: step every {}ms, telemetry every {}ms",
            step_interval_ms, telemetry_interval_ms
        );
        Self {
            step: IntervalTimer::new(step_interval_ms, start_ms),
            telemetry: IntervalTimer::new(telemetry_interval_ms, start_ms),
        }
    }

    /// Check both gates. Call once per loop iteration.
    pub fn poll(&mut self, now_ms: u32) -> DueTasks {
        DueTasks {
            step: self.step.poll(now_ms),
            telemetry: self.telemetry.poll(now_ms),
        }
    }

    /// Restart both gates from `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.step.reset(now_ms);
        self.telemetry.reset(now_ms);
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
