//! Exponentially weighted moving average for noisy analog inputs.
//!
//! `filtered = α·raw + (1 − α)·filtered`
//!
//! The filter is seeded with the first sample it sees rather than zero, so
//! the output never ramps up from an artificial 0 after boot.

/// Single-pole low-pass filter.
#[derive(Debug, Clone, Copy)]
pub struct EwmaFilter {
    alpha: f32,
    value: Option<f32>,
}

impl EwmaFilter {
    /// `alpha` is clamped into `(0, 1]`; 1.0 disables smoothing.
    pub fn new(alpha: f32) -> Self {
        let alpha = if alpha.is_finite() && alpha > 0.0 {
            alpha.min(1.0)
        } else {
            1.0
        };
        Self { alpha, value: None }
    }

    /// Reset the filter output to `raw`.
    pub fn seed(&mut self, raw: u16) {
        self.value = Some(raw as f32);
    }

    /// Fold one sample in and return the new filtered value.
    pub fn update(&mut self, raw: u16) -> f32 {
        let raw = raw as f32;
        let next = match self.value {
            None => raw,
            Some(prev) => self.alpha * raw + (1.0 - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }

    /// Current output, or `None` before the first sample.
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    pub fn is_seeded(&self) -> bool {
        self.value.is_some()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
