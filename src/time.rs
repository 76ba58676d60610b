//! Frame timing for the animation loop.
//!
//! Particle motion is tuned in pixels per frame at 60 fps. [`FrameClock`]
//! measures real elapsed time between frames and converts it into a scale
//! factor against that baseline, so the animation moves at the same visible
//! speed on a 144 Hz display and on a struggling 20 fps one.
//!
//! # Example
//!
//! ```ignore
//! use driftfall::time::FrameClock;
//! use std::time::Instant;
//!
//! let mut clock = FrameClock::new();
//!
//! // In your frame loop:
//! let scale = clock.tick(Instant::now());
//! position_y += speed * scale;
//! ```

use std::time::Instant;

/// Milliseconds per frame at the 60 fps reference rate.
pub const BASELINE_FRAME_MS: f32 = 16.67;

/// Longest frame delta the clock will report, in milliseconds.
///
/// Caps the step taken after a long stall (window hidden, machine asleep)
/// so particles do not teleport across the screen in a single frame.
pub const MAX_FRAME_MS: f32 = 50.0;

/// Tracks elapsed time between animation frames.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last tick occurred. `None` until the first tick, and again
    /// after [`reset`](FrameClock::reset).
    last_tick: Option<Instant>,
    /// Total ticks since creation.
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock with no baseline yet.
    pub fn new() -> Self {
        Self {
            last_tick: None,
            frame_count: 0,
        }
    }

    /// Advance the clock and return the time scale for this frame.
    ///
    /// The scale is `elapsed_ms / 16.67`, with elapsed time clamped to
    /// [`MAX_FRAME_MS`]. The first tick after creation or
    /// [`reset`](FrameClock::reset) has no baseline and reports exactly
    /// `1.0`, one ordinary frame.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta_ms = match self.last_tick {
            Some(last) => {
                let elapsed = now.duration_since(last).as_secs_f32() * 1000.0;
                elapsed.min(MAX_FRAME_MS)
            }
            None => BASELINE_FRAME_MS,
        };
        self.last_tick = Some(now);
        self.frame_count += 1;
        delta_ms / BASELINE_FRAME_MS
    }

    /// Drop the delta baseline.
    ///
    /// Called when the animation resumes after being paused, so the first
    /// resumed frame advances by one ordinary step instead of the whole
    /// hidden interval.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// Total ticks since the clock was created.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_tick_is_baseline() {
        let mut clock = FrameClock::new();
        let scale = clock.tick(Instant::now());
        assert_eq!(scale, 1.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_tick_scales_against_baseline() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);

        // Two baseline frames worth of elapsed time.
        let scale = clock.tick(start + Duration::from_micros(33_340));
        assert!((scale - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);

        let scale = clock.tick(start + Duration::from_secs(5));
        let expected = MAX_FRAME_MS / BASELINE_FRAME_MS;
        assert!((scale - expected).abs() < 0.001);
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);
        clock.reset();

        // Hours may have passed; the first tick after reset is still 1.0.
        let scale = clock.tick(start + Duration::from_secs(3600));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_frame_count_is_monotonic() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        for _ in 0..5 {
            clock.tick(start);
        }
        clock.reset();
        clock.tick(start);
        assert_eq!(clock.frame(), 6);
    }
}
