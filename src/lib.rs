//! # warp-tunnel
//!
//! A continuously flowing, camera-relative tunnel of point particles.
//!
//! Every particle sits on a fixed ring slot (angle + radius) and travels from
//! the far plane towards the viewer along a gently curved path. When it reaches
//! the near plane it is recycled back to the far plane, forever. Position and
//! size are derived purely from a scalar depth in `(0, 1]`.
//!
//! The crate stops at a per-particle buffer of `(position, size, color,
//! lifetime)` records; drawing them is up to a [`RenderSink`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use warp_tunnel::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut tunnel = WarpTunnel::builder(TunnelConfig::default())
//!         .with_seed(7)
//!         .with_pose_provider(Camera::new())
//!         .with_render_sink(|particles: &[TunnelParticle]| {
//!             // upload `bytemuck::cast_slice(particles)` to the GPU
//!         })
//!         .build()?;
//!
//!     let mut time = Time::new();
//!     loop {
//!         tunnel.frame(time.update());
//!     }
//! }
//! ```
//!
//! ## Frame Phases
//!
//! Each [`WarpTunnel::frame`] runs three phases in order:
//!
//! 1. sample the [`PoseProvider`] once,
//! 2. step every depth, recycling particles at the near plane ([`step`]),
//! 3. map every particle to world space ([`geometry`]) and submit the buffer.
//!
//! With the `parallel` feature, phases 2 and 3 each run as a rayon pass.
//!
//! ## Degraded Mode
//!
//! A tunnel built without a pose provider or render sink is inert: it
//! allocates nothing and every frame is a no-op. Only an invalid
//! [`TunnelConfig`] is an error.

mod config;
pub mod envelope;
mod error;
pub mod geometry;
mod output;
mod pose;
mod spawn;
pub mod step;
mod store;
pub mod time;
mod tunnel;

pub use config::TunnelConfig;
pub use envelope::{Envelope, Session};
pub use error::{ConfigError, Result};
pub use glam::{Vec3, Vec4};
pub use output::{RenderSink, TunnelParticle, LIFETIME_SENTINEL};
pub use pose::{Camera, Pose, PoseProvider};
pub use spawn::Spawner;
pub use store::ParticleStore;
pub use time::Time;
pub use tunnel::{FrameStats, TunnelBuilder, WarpTunnel};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use warp_tunnel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::TunnelConfig;
    pub use crate::envelope::{Envelope, Session};
    pub use crate::error::ConfigError;
    pub use crate::output::{RenderSink, TunnelParticle};
    pub use crate::pose::{Camera, Pose, PoseProvider};
    pub use crate::spawn::Spawner;
    pub use crate::time::Time;
    pub use crate::tunnel::{FrameStats, WarpTunnel};
    pub use crate::{Vec3, Vec4};
}
