//! Per-frame output records and the render sink they are handed to.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Remaining lifetime reported for every particle, in seconds.
///
/// Large enough that a host particle engine never expires a particle on its
/// own; the tunnel's recycling is the only thing that moves particles back.
pub const LIFETIME_SENTINEL: f32 = 999.0;

/// One particle as the renderer sees it for the current frame.
///
/// `#[repr(C)]` and [`Pod`] so a sink can upload the whole slice with
/// `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TunnelParticle {
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 4],
    pub lifetime: f32,
}

impl TunnelParticle {
    pub fn new(position: Vec3, size: f32, color: Vec4) -> Self {
        Self {
            position,
            size,
            color: color.to_array(),
            lifetime: LIFETIME_SENTINEL,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }
}

/// Consumer of the per-frame particle buffer.
///
/// `submit` receives exactly one record per particle, in index order. The
/// slice is only valid for the call; copy what needs to outlive it.
pub trait RenderSink {
    fn submit(&mut self, particles: &[TunnelParticle]);
}

/// Keeps a copy of the most recent frame.
impl RenderSink for Vec<TunnelParticle> {
    fn submit(&mut self, particles: &[TunnelParticle]) {
        self.clear();
        self.extend_from_slice(particles);
    }
}

impl<F> RenderSink for F
where
    F: FnMut(&[TunnelParticle]),
{
    fn submit(&mut self, particles: &[TunnelParticle]) {
        self(particles)
    }
}
