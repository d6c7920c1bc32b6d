//! Depth → world-space mapping.
//!
//! Everything here is a pure function of its arguments, so a particle's
//! output can be recomputed (and tested) without running the stepper.
//!
//! Depth 1 sits at the far plane, depth 0 at the near plane:
//!
//! ```text
//!  viewer ── near_dist ─────────────── far_dist
//!    │          •  (big, on axis)          ·   (small, dropped by bend_strength)
//! ```

use crate::config::TunnelConfig;
use crate::pose::Pose;
use glam::{Vec3, Vec4};

// Exact at both ends: t = 0 gives `a`, t = 1 gives `b`.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Distance along the viewer's forward axis.
#[inline]
pub fn linear_distance(near_dist: f32, far_dist: f32, depth: f32) -> f32 {
    lerp(near_dist, far_dist, depth)
}

/// Vertical offset that curves the tunnel away from a straight line.
///
/// Applied along the viewer's up axis; grows with `depth^exponent` so the
/// far end drops (for positive strength) while the near end stays on axis.
#[inline]
pub fn bend_offset(strength: f32, exponent: f32, depth: f32) -> f32 {
    -strength * depth.powf(exponent)
}

/// Visual size, largest at the near plane.
#[inline]
pub fn size_at(near_size: f32, far_size: f32, depth: f32) -> f32 {
    lerp(near_size, far_size, depth)
}

/// Offset of a ring slot in the viewer's right/up plane.
#[inline]
pub fn ring_offset(angle: f32, radius: f32) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (cos * radius, sin * radius)
}

/// World position, size and color of one particle.
pub fn map_particle(
    depth: f32,
    angle: f32,
    radius: f32,
    pose: &Pose,
    config: &TunnelConfig,
) -> (Vec3, f32, Vec4) {
    let distance = linear_distance(config.near_dist, config.far_dist, depth);
    let bend = bend_offset(config.bend_strength, config.bend_exponent, depth);
    let (x, y) = ring_offset(angle, radius);

    let position = pose.position + pose.forward * distance + pose.right * x + pose.up * (y + bend);
    let size = size_at(config.near_size, config.far_size, depth);

    (position, size, config.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_linear_distance_endpoints() {
        assert_eq!(linear_distance(0.4, 60.0, 0.0), 0.4);
        assert_eq!(linear_distance(0.4, 60.0, 1.0), 60.0);
    }

    #[test]
    fn test_bend_offset_literal() {
        let expected = -4.0_f32 * 0.5_f32.powf(2.2);
        assert_eq!(bend_offset(4.0, 2.2, 0.5), expected);
        assert!((expected - (-0.870_550_6)).abs() < 1e-5);
    }

    #[test]
    fn test_bend_offset_flat_at_near_plane() {
        assert_eq!(bend_offset(4.0, 2.2, 0.0), 0.0);
        assert_eq!(bend_offset(4.0, 2.2, 1.0), -4.0);
    }

    #[test]
    fn test_size_endpoints_and_monotonic() {
        let (near, far) = (0.22, 0.05);
        assert_eq!(size_at(near, far, 0.0), near);
        assert_eq!(size_at(near, far, 1.0), far);

        let mut previous = size_at(near, far, 0.0);
        for i in 1..=100 {
            let size = size_at(near, far, i as f32 / 100.0);
            assert!(size <= previous);
            previous = size;
        }
    }

    #[test]
    fn test_map_particle_identity_pose() {
        let config = TunnelConfig::default().with_bend(0.0, 2.2);
        let (position, size, color) = map_particle(0.0, FRAC_PI_2, 2.0, &Pose::IDENTITY, &config);

        // On the near plane, directly above the axis
        assert!((position - Vec3::new(0.0, 2.0, -0.4)).length() < 1e-5);
        assert_eq!(size, config.near_size);
        assert_eq!(color, config.color);
    }

    #[test]
    fn test_map_particle_follows_pose() {
        let config = TunnelConfig::default();
        let pose = Pose {
            position: Vec3::new(10.0, 0.0, 0.0),
            forward: Vec3::X,
            right: Vec3::Z,
            up: Vec3::Y,
        };
        let (position, _, _) = map_particle(1.0, 0.0, 3.0, &pose, &config);

        let expected = Vec3::new(10.0 + config.far_dist, -config.bend_strength, 3.0);
        assert!((position - expected).length() < 1e-4);
    }

    #[test]
    fn test_map_particle_is_pure() {
        let config = TunnelConfig::default();
        let pose = Pose::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 9.0), Vec3::Y);
        let a = map_particle(0.37, 1.1, 4.2, &pose, &config);
        let b = map_particle(0.37, 1.1, 4.2, &pose, &config);

        assert_eq!(a.0.to_array().map(f32::to_bits), b.0.to_array().map(f32::to_bits));
        assert_eq!(a.1.to_bits(), b.1.to_bits());
        assert_eq!(a.2, b.2);
    }
}
