//! World clock and frame timing.

use std::time::Duration;

/// Upper bound on a single frame delta. A stalled frame (debugger, window drag)
/// would otherwise teleport everything that integrates velocity.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Monotonic frame clock, stepped by explicit deltas.
///
/// The arena only advances it during playing ticks, so [`Time::elapsed`] (the
/// timestamp every simulation record is stamped with) stands still while paused.
#[derive(Debug)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total simulated time.
    elapsed: Duration,
    /// Frames stepped so far.
    frame_count: u64,
    /// Fixed timestep for headless stepping (default 60 Hz).
    fixed_timestep: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
        }
    }

    /// Step by an explicit delta (clamped to [`MAX_FRAME_DELTA`]).
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta.min(MAX_FRAME_DELTA);
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Step by a delta in seconds. Negative or non-finite input counts as zero.
    pub fn advance_seconds(&mut self, seconds: f32) {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.advance(Duration::from_secs_f32(seconds.min(MAX_FRAME_DELTA.as_secs_f32())));
    }

    /// Step by the fixed timestep.
    pub fn advance_fixed(&mut self) {
        self.advance(self.fixed_timestep);
    }

    /// Rewind to time zero.
    pub fn reset(&mut self) {
        self.delta = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.frame_count = 0;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Current timestamp.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Time since `stamp`, zero if `stamp` is in the future.
    pub fn since(&self, stamp: Duration) -> Duration {
        self.elapsed.saturating_sub(stamp)
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }
}
