//! Particle state store.
//!
//! Struct-of-arrays over a fixed arena indexed `0..N`. Only the depth column
//! is ever written after spawning; angle and radius are a particle's ring slot
//! and stay fixed for its whole life.

/// Persistent per-particle state.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStore {
    pub(crate) depth: Vec<f32>,
    angle: Vec<f32>,
    radius: Vec<f32>,
}

impl ParticleStore {
    /// Allocate a zeroed store for `count` particles.
    ///
    /// Callers must seed it (see [`Spawner`](crate::Spawner)) before stepping,
    /// since a zero depth is outside the valid range.
    pub(crate) fn with_count(count: usize) -> Self {
        Self {
            depth: vec![0.0; count],
            angle: vec![0.0; count],
            radius: vec![0.0; count],
        }
    }

    /// Build a store from explicit columns.
    ///
    /// Returns `None` when the columns differ in length or are empty. Depths
    /// outside `(0, 1]` (non-positive, above 1 or NaN) start at the far
    /// plane, depth 1, as if just recycled.
    pub fn from_parts(depth: Vec<f32>, angle: Vec<f32>, radius: Vec<f32>) -> Option<Self> {
        if depth.is_empty() || depth.len() != angle.len() || depth.len() != radius.len() {
            return None;
        }
        let depth = depth
            .into_iter()
            .map(|d| if d > 0.0 && d <= 1.0 { d } else { 1.0 })
            .collect();
        Some(Self {
            depth,
            angle,
            radius,
        })
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    /// Whether the store holds no particles. Never true for a spawned tunnel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    #[inline]
    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub fn angles(&self) -> &[f32] {
        &self.angle
    }

    #[inline]
    pub fn radii(&self) -> &[f32] {
        &self.radius
    }

    /// `(depth, angle, radius)` of particle `index`.
    pub fn get(&self, index: usize) -> Option<(f32, f32, f32)> {
        Some((
            *self.depth.get(index)?,
            *self.angle.get(index)?,
            *self.radius.get(index)?,
        ))
    }

    /// Overwrite particle `index` with a fresh identity and depth.
    pub(crate) fn set(&mut self, index: usize, depth: f32, angle: f32, radius: f32) {
        self.depth[index] = depth;
        self.angle[index] = angle;
        self.radius[index] = radius;
    }
}
