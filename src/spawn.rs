//! Particle initialization.
//!
//! A [`Spawner`] owns the random source used to seed every particle's ring
//! slot and starting depth. Seed it explicitly to reproduce a tunnel exactly:
//!
//! ```ignore
//! let mut spawner = Spawner::from_seed(7);
//! let store = spawner.spawn(&config);
//! ```

use crate::config::TunnelConfig;
use crate::store::ParticleStore;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Seedable source of initial particle state.
#[derive(Clone, Debug)]
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    /// Spawner with a fixed seed. Same seed, same particles.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Spawner seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    // ========== Random primitives ==========

    /// Starting depth in `(0, 1]`.
    #[inline]
    pub fn random_depth(&mut self) -> f32 {
        // gen() is [0, 1); flip it so 0 is excluded and 1 is reachable
        1.0 - self.rng.gen::<f32>()
    }

    /// Ring angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Ring radius between `inner` and `outer`.
    ///
    /// Square root of the uniform sample so rings do not bunch up at the
    /// inner edge.
    #[inline]
    pub fn random_ring_radius(&mut self, inner: f32, outer: f32) -> f32 {
        let t = self.rng.gen::<f32>().sqrt();
        inner + (outer - inner) * t
    }

    // ========== Store seeding ==========

    /// Allocate and seed a store for `config`.
    pub fn spawn(&mut self, config: &TunnelConfig) -> ParticleStore {
        let mut store = ParticleStore::with_count(config.count());
        self.reseed(&mut store, config);
        store
    }

    /// Reseed every particle of an existing store in place.
    pub fn reseed(&mut self, store: &mut ParticleStore, config: &TunnelConfig) {
        for i in 0..store.len() {
            let depth = self.random_depth();
            let angle = self.random_angle();
            let radius = self.random_ring_radius(config.inner_radius, config.outer_radius);
            store.set(i, depth, angle, radius);
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::from_entropy()
    }
}
