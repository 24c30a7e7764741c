/// Per-tick monotonic clock.
///
/// The host reads its wall clock once per display callback and hands the
/// reading to `advance_to`. Every consumer inside the same tick then sees
/// that single sample, so positions used for camera paths and for drawing
/// can never disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    /// Milliseconds at the current tick.
    now_ms: f64,
    /// Number of ticks observed.
    frame: u64,
}

impl FrameClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            frame: 0,
        }
    }

    /// Move to a new reading. Readings earlier than the current one are
    /// ignored so the clock never runs backwards.
    pub fn advance_to(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        self.frame += 1;
    }

    /// The current tick's reading in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of ticks since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Scaled clock that drives orbital angles: `now_ms / ms_per_unit`.
    pub fn global_time(&self, ms_per_unit: f64) -> f64 {
        self.now_ms / ms_per_unit
    }
}
