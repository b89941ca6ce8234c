//! Frame timing: rolling delta-time history, elapsed-time accumulator and a
//! smoothed FPS figure for the HUD.
//!
//! Pure numeric code, compiled on every target so it can be unit-tested on
//! the host.

use std::collections::VecDeque;

/// How many delta-time samples the rolling window keeps.
const HISTORY_DEPTH: usize = 10;

/// Synthetic first sample so the window is never empty (~60 FPS).
const SEED_DT: f64 = 1.0 / 60.0;

/// Mean delta below this is treated as this, so the FPS readout never
/// divides by zero.
const MIN_MEAN_DT: f64 = 1.0e-6;

/// Tracks per-frame timing across the render loop.
///
/// `tick` is called once per rendered frame with a millisecond timestamp
/// (`performance.now()` on the web). The newest delta is what per-frame
/// scaling should use; the mean of the window only feeds the FPS display,
/// so a single huge delta from a backgrounded tab washes out over at most
/// `HISTORY_DEPTH` frames.
pub struct FrameClock {
    /// Recent deltas in seconds, newest first. Never empty, never longer
    /// than `HISTORY_DEPTH`.
    history: VecDeque<f64>,
    /// Sum of every delta returned by `tick`, in seconds.
    elapsed: f64,
    last_timestamp_ms: f64,
}

impl FrameClock {
    /// Creates a clock whose first `tick` will measure from `now_ms`.
    pub fn new(now_ms: f64) -> Self {
        let mut history = VecDeque::with_capacity(HISTORY_DEPTH + 1);
        history.push_front(SEED_DT);
        Self {
            history,
            elapsed: 0.0,
            last_timestamp_ms: now_ms,
        }
    }

    /// Records one frame. Returns the delta in seconds.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = (now_ms - self.last_timestamp_ms) / 1_000.0;
        self.history.push_front(dt);
        self.history.truncate(HISTORY_DEPTH);
        self.elapsed += dt;
        self.last_timestamp_ms = now_ms;
        dt
    }

    /// The most recent delta, in seconds. Not smoothed.
    pub fn current_dt(&self) -> f64 {
        // history is seeded at construction and only ever truncated to
        // HISTORY_DEPTH, so the front always exists.
        *self.history.front().unwrap_or(&SEED_DT)
    }

    /// Total time accumulated over all ticks, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames per second derived from the mean of the rolling window.
    /// Display-only; the mean is clamped away from zero.
    pub fn smoothed_rate(&self) -> f64 {
        let mean = self.history.iter().sum::<f64>() / self.history.len() as f64;
        1.0 / mean.max(MIN_MEAN_DT)
    }

    #[cfg(test)]
    fn history_len(&self) -> usize {
        self.history.len()
    }
}
