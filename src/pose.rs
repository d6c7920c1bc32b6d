//! Viewer pose and the providers that supply it.
//!
//! The tunnel samples a [`PoseProvider`] exactly once per frame and uses that
//! snapshot for every particle.

use glam::Vec3;

/// Viewer position plus an orthonormal forward/right/up basis for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Pose {
    /// Viewer at the origin looking down -Z with +Y up (right-handed).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        forward: Vec3::NEG_Z,
        right: Vec3::X,
        up: Vec3::Y,
    };

    /// Build a pose at `position` looking towards `target`.
    ///
    /// Falls back to the identity basis when `target` coincides with
    /// `position` or the view direction is parallel to `world_up`.
    pub fn look_at(position: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let forward = (target - position).normalize_or_zero();
        let right = forward.cross(world_up).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return Self {
                position,
                ..Self::IDENTITY
            };
        }
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Source of the viewer pose.
///
/// Returning `None` means the viewer is unavailable this frame; the tunnel
/// then skips the frame.
pub trait PoseProvider {
    fn sample(&mut self) -> Option<Pose>;
}

/// A fixed pose never moves.
impl PoseProvider for Pose {
    fn sample(&mut self) -> Option<Pose> {
        Some(*self)
    }
}

impl<F> PoseProvider for F
where
    F: FnMut() -> Option<Pose>,
{
    fn sample(&mut self) -> Option<Pose> {
        self()
    }
}

/// Orbit camera around a target point.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    /// Create a camera with default positioning.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 3.0,
            target: Vec3::ZERO,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Current pose looking at the target.
    pub fn pose(&self) -> Pose {
        Pose::look_at(self.position(), self.target, Vec3::Y)
    }

    /// Rotate around the target, keeping pitch away from the poles.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-1.5, 1.5);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseProvider for Camera {
    fn sample(&mut self) -> Option<Pose> {
        Some(self.pose())
    }
}
