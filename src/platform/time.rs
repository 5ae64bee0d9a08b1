//! Frame pacing
//!
//! Wall-clock frames arrive at whatever rate the host manages; the simulation
//! only ever sees whole fixed ticks.

use crate::consts::{MAX_FRAME_MS, TICK_MS};

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Fixed-step accumulator fed by frame timestamps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    accumulator_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp; returns how many ticks to run.
    ///
    /// The first frame after creation or [`FrameClock::reset`] only records
    /// the timestamp. Each step is clamped to `MAX_FRAME_MS`.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        let dt = (now_ms - last).clamp(0.0, MAX_FRAME_MS);
        if !dt.is_finite() {
            return 0;
        }
        self.accumulator_ms += dt;

        let mut ticks = 0;
        // Small epsilon so a frame of exactly TICK_MS isn't lost to rounding
        while self.accumulator_ms + 1e-6 >= TICK_MS {
            self.accumulator_ms = (self.accumulator_ms - TICK_MS).max(0.0);
            ticks += 1;
        }
        ticks
    }

    /// Forget the last timestamp (pause, tab hidden) so the gap is never replayed
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator_ms = 0.0;
    }
}
