//! Frame timing.
//!
//! [`FrameClock`] is ticked once per redraw by the frame loop. Its delta is
//! plain wall-clock time since the previous tick: there is no clamping and no
//! fixed-step accumulation, so a long stall shows up as one large delta on
//! the next frame.

use std::time::{Duration, Instant};

/// Wall-clock delta between consecutive frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    previous: Option<Instant>,
    delta: Duration,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: None,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance to a new frame and return its delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to a frame that started at `now`. The first tick has a zero
    /// delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = match self.previous {
            Some(previous) => now.saturating_duration_since(previous),
            None => Duration::ZERO,
        };
        self.previous = Some(now);
        self.frame_count += 1;
        self.delta.as_secs_f32()
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated FPS based on the last delta.
    pub fn fps(&self) -> f32 {
        let secs = self.delta.as_secs_f32();
        if secs > 0.0 { 1.0 / secs } else { 0.0 }
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
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(Instant::now()), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn delta_is_time_since_previous_tick() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let delta = clock.tick_at(start + Duration::from_millis(16));
        assert_abs_diff_eq!(delta, 0.016, epsilon = 1e-6);
        assert_abs_diff_eq!(clock.fps(), 62.5, epsilon = 1e-2);
    }

    #[test]
    fn large_gaps_are_not_clamped() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let delta = clock.tick_at(start + Duration::from_secs(5));
        assert_abs_diff_eq!(delta, 5.0, epsilon = 1e-6);
    }
}
