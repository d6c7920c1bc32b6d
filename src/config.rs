//! Tunnel configuration.
//!
//! A [`TunnelConfig`] is fixed for the lifetime of a tunnel. It can be built
//! with `with_*` setters or loaded from JSON:
//!
//! ```ignore
//! let config = TunnelConfig::default()
//!     .with_particle_count(8_000)
//!     .with_radii(1.0, 5.0)
//!     .with_speed(6.0);
//! config.validate()?;
//! config.save("tunnel.json")?;
//! ```
//!
//! Missing JSON fields fall back to the defaults, so a file may only list
//! the values it overrides.

use crate::error::{ConfigError, Result};
use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters for one tunnel session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TunnelConfig {
    /// Number of particles (fixed, the store never resizes).
    pub particle_count: u32,
    /// Smallest ring radius around the tunnel axis.
    pub inner_radius: f32,
    /// Largest ring radius around the tunnel axis.
    pub outer_radius: f32,
    /// Distance along the view axis at depth 0.
    pub near_dist: f32,
    /// Distance along the view axis at depth 1.
    pub far_dist: f32,
    /// Vertical drop of the far end of the tunnel.
    pub bend_strength: f32,
    /// Curve exponent applied to depth before bending.
    pub bend_exponent: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Particle size at the near plane.
    pub near_size: f32,
    /// Particle size at the far plane.
    pub far_size: f32,
    /// RGBA color shared by every particle.
    pub color: Vec4,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            particle_count: 5000,
            inner_radius: 1.2,
            outer_radius: 6.0,
            near_dist: 0.4,
            far_dist: 60.0,
            bend_strength: 4.0,
            bend_exponent: 2.2,
            speed: 4.0,
            near_size: 0.22,
            far_size: 0.05,
            color: Vec4::new(0.75, 0.9, 1.0, 0.35),
        }
    }
}

impl TunnelConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the ring sampling bounds.
    pub fn with_radii(mut self, inner: f32, outer: f32) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }

    /// Set the near and far projection distances.
    pub fn with_distances(mut self, near: f32, far: f32) -> Self {
        self.near_dist = near;
        self.far_dist = far;
        self
    }

    /// Set the bend shape.
    pub fn with_bend(mut self, strength: f32, exponent: f32) -> Self {
        self.bend_strength = strength;
        self.bend_exponent = exponent;
        self
    }

    /// Set the travel speed in world units per second.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set particle sizes at the near and far planes.
    pub fn with_sizes(mut self, near: f32, far: f32) -> Self {
        self.near_size = near;
        self.far_size = far;
        self
    }

    /// Set the shared particle color.
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Number of particles as a `usize` for indexing.
    #[inline]
    pub fn count(&self) -> usize {
        self.particle_count as usize
    }

    /// Depth units travelled per second of frame time.
    ///
    /// Only meaningful on a validated config, where `far_dist > 0`.
    #[inline]
    pub fn depth_rate(&self) -> f32 {
        self.speed / self.far_dist
    }

    /// Seconds a particle takes to travel from the far plane to the near plane.
    ///
    /// Infinite for a frozen (zero speed) tunnel.
    pub fn cycle_period(&self) -> f32 {
        self.far_dist / self.speed
    }

    /// Check every field a tunnel relies on.
    ///
    /// Rejects an empty tunnel, inverted radii, a non-positive far distance,
    /// a negative speed and any non-finite number.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("inner_radius", self.inner_radius),
            ("outer_radius", self.outer_radius),
            ("near_dist", self.near_dist),
            ("far_dist", self.far_dist),
            ("bend_strength", self.bend_strength),
            ("bend_exponent", self.bend_exponent),
            ("speed", self.speed),
            ("near_size", self.near_size),
            ("far_size", self.far_size),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if !self.color.is_finite() {
            let value = self.color.to_array().into_iter().find(|c| !c.is_finite()).unwrap_or(f32::NAN);
            return Err(ConfigError::NonFinite { field: "color", value });
        }

        if self.particle_count == 0 {
            return Err(ConfigError::EmptyTunnel);
        }
        if self.inner_radius >= self.outer_radius {
            return Err(ConfigError::InvalidRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        if self.far_dist <= 0.0 {
            return Err(ConfigError::InvalidFarDistance(self.far_dist));
        }
        // Zero is allowed: a frozen tunnel
        if self.speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TunnelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_tunnel() {
        let config = TunnelConfig::default().with_particle_count(0);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTunnel)));
    }

    #[test]
    fn test_rejects_inverted_radii() {
        let config = TunnelConfig::default().with_radii(3.0, 3.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRadii { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_far_distance() {
        let config = TunnelConfig::default().with_distances(0.4, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFarDistance(_))
        ));

        let config = TunnelConfig::default().with_distances(0.4, -10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = TunnelConfig::default().with_speed(-4.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSpeed(s)) if s == -4.0));

        let frozen = TunnelConfig::default().with_speed(0.0);
        assert!(frozen.validate().is_ok());
        assert!(frozen.cycle_period().is_infinite());
    }

    #[test]
    fn test_rejects_nan() {
        let config = TunnelConfig::default().with_speed(f32::NAN);
        match config.validate() {
            Err(ConfigError::NonFinite { field, .. }) => assert_eq!(field, "speed"),
            other => panic!("expected NonFinite, got {:?}", other),
        }

        let config = TunnelConfig::default().with_color(Vec4::new(1.0, f32::INFINITY, 1.0, 1.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "color", .. })
        ));
    }

    #[test]
    fn test_depth_rate_and_period() {
        let config = TunnelConfig::default().with_speed(4.0).with_distances(0.4, 60.0);
        assert!((config.depth_rate() - 4.0 / 60.0).abs() < 1e-7);
        assert!((config.cycle_period() - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TunnelConfig::from_json(r#"{ "particle_count": 12, "speed": 2.5 }"#).unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.speed, 2.5);
        assert_eq!(config.far_dist, TunnelConfig::default().far_dist);
    }

    #[test]
    fn test_invalid_json_is_rejected_after_parse() {
        let result = TunnelConfig::from_json(r#"{ "far_dist": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidFarDistance(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tunnel.json");
        let config = TunnelConfig::default()
            .with_particle_count(64)
            .with_color(Vec4::new(1.0, 0.5, 0.25, 1.0));

        config.save(&path).unwrap();
        let loaded = TunnelConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
