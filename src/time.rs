//! Frame clock.
//!
//! Turns wall-clock time, a fixed step, or manually supplied deltas into the
//! non-negative frame delta the tunnel steps with.
//!
//! # Example
//!
//! ```ignore
//! use warp_tunnel::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In your frame loop:
//! let dt = time.update();
//! tunnel.frame(dt);
//! ```

use std::time::Instant;

/// Time tracking for a tunnel session.
#[derive(Debug)]
pub struct Time {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total scaled time in seconds.
    elapsed_secs: f32,
    /// Scaled time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Whether time is paused.
    paused: bool,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl Time {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Create a clock that always advances by `delta` seconds per update.
    pub fn fixed(delta: f32) -> Self {
        let mut time = Self::new();
        time.set_fixed_delta(Some(delta));
        time
    }

    /// Measure the frame against the wall clock (or the fixed delta).
    ///
    /// Returns the frame delta in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(self.fixed_delta.unwrap_or(raw))
    }

    /// Advance by an externally measured delta (e.g. from a host engine).
    ///
    /// Negative or non-finite input counts as zero. Returns the scaled delta.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let raw_delta = if raw_delta.is_finite() { raw_delta.max(0.0) } else { 0.0 };
        self.delta_secs = raw_delta * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;
        self.delta_secs
    }

    /// Total scaled time in seconds, excluding paused spans.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames counted since start (paused updates are not counted).
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// While paused, `update()` and `advance()` return 0.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            // Don't bill the paused span to the next frame
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set a fixed delta time. Pass `None` to use real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier, clamped to be non-negative.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset the clock to its initial state, keeping fixed delta and scale.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let delta = time.update();

        assert!(delta > 0.0);
        assert_eq!(time.elapsed(), delta);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::fixed(0.5);
        time.update();

        time.pause();
        assert!(time.is_paused());
        assert_eq!(time.update(), 0.0);
        assert_eq!(time.elapsed(), 0.5);

        time.toggle_pause();
        assert_eq!(time.update(), 0.5);
        assert_eq!(time.elapsed(), 1.0);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut time = Time::new();
        assert_eq!(time.advance(-0.25), 0.0);
        assert_eq!(time.advance(f32::NAN), 0.0);
        assert_eq!(time.elapsed(), 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::fixed(0.5);
        time.set_time_scale(2.0);
        assert_eq!(time.update(), 1.0);

        // Negative scale should clamp to 0
        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
        assert_eq!(time.update(), 0.0);
    }

    #[test]
    fn test_fixed_delta() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(1.0 / 60.0));

        thread::sleep(Duration::from_millis(20));
        time.update();

        let expected = 1.0 / 60.0;
        assert!((time.delta() - expected).abs() < 0.0001);
    }

    #[test]
    fn test_reset() {
        let mut time = Time::fixed(0.25);
        time.update();
        time.reset();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.update(), 0.25);
    }
}
