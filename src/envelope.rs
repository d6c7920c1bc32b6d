//! Session intensity envelope.
//!
//! A session rises from silence, holds near its peak and falls back to zero
//! over `duration_secs`. Hosts use the intensity to drive whatever they like
//! (audio volume, background tint); the tunnel itself does not read it.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Durations at or below this are treated as already finished.
const MIN_DURATION: f32 = 0.001;

/// Hermite smoothstep between `edge0` and `edge1`.
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Shape of a session's intensity over time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Envelope {
    /// Session length in seconds.
    pub duration_secs: f32,
    /// Peak intensity reached mid-session.
    pub base_intensity: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            duration_secs: 600.0,
            base_intensity: 0.6,
        }
    }
}

impl Envelope {
    pub fn new(duration_secs: f32, base_intensity: f32) -> Self {
        Self {
            duration_secs,
            base_intensity,
        }
    }

    /// Normalized session progress in `[0, 1]`.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration_secs <= MIN_DURATION {
            return 1.0;
        }
        (elapsed / self.duration_secs).clamp(0.0, 1.0)
    }

    /// Intensity `elapsed` seconds into the session.
    ///
    /// Zero at both ends, `base_intensity` at the midpoint.
    pub fn intensity_at(&self, elapsed: f32) -> f32 {
        let wave = (self.progress(elapsed) * PI).sin();
        self.base_intensity * smoothstep(0.0, 1.0, wave)
    }
}

/// A running session over an [`Envelope`].
#[derive(Clone, Debug)]
pub struct Session {
    envelope: Envelope,
    elapsed: f32,
    running: bool,
}

impl Session {
    /// Start a session at zero elapsed time.
    pub fn start(envelope: Envelope) -> Self {
        log::info!(
            "session started: {:.0}s at peak intensity {:.2}",
            envelope.duration_secs,
            envelope.base_intensity
        );
        Self {
            envelope,
            elapsed: 0.0,
            running: true,
        }
    }

    /// Restart from zero, optionally with a different envelope.
    pub fn restart(&mut self, envelope: Option<Envelope>) {
        if let Some(envelope) = envelope {
            self.envelope = envelope;
        }
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advance the session clock and return the current intensity.
    ///
    /// Returns `None` once the session has finished; the frame that crosses
    /// the end still reports its (zero) intensity.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        let intensity = self.envelope.intensity_at(self.elapsed);

        if self.elapsed >= self.envelope.duration_secs {
            self.running = false;
            log::info!("session finished after {:.1}s", self.elapsed);
        }
        Some(intensity)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}
