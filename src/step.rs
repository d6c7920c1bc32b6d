//! Per-frame depth advance and recycling.

use crate::config::TunnelConfig;
use crate::store::ParticleStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Depth travelled during a frame of `dt` seconds.
///
/// Negative or non-finite frame times count as zero.
#[inline]
pub fn step_depth(config: &TunnelConfig, dt: f32) -> f32 {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    config.depth_rate() * dt
}

/// Advance one depth value, recycling it to the far plane once it reaches
/// the near plane. Returns `true` when the particle was recycled.
#[inline]
pub fn advance_depth(depth: &mut f32, step: f32) -> bool {
    *depth -= step;
    if *depth <= 0.0 {
        *depth = 1.0;
        true
    } else {
        false
    }
}

/// Advance every particle in the store by a precomputed depth `step`
/// (see [`step_depth`]).
///
/// Returns the number of particles recycled this frame. Never allocates.
pub fn advance(store: &mut ParticleStore, step: f32) -> usize {

    #[cfg(feature = "parallel")]
    let recycled = store
        .depth
        .par_iter_mut()
        .map(|d| advance_depth(d, step))
        .filter(|recycled| *recycled)
        .count();

    #[cfg(not(feature = "parallel"))]
    let recycled = store
        .depth
        .iter_mut()
        .map(|d| advance_depth(d, step))
        .filter(|recycled| *recycled)
        .count();

    recycled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::Spawner;

    #[test]
    fn test_step_depth_scales_by_far_dist() {
        let config = TunnelConfig::default().with_speed(4.0).with_distances(0.4, 60.0);
        assert!((step_depth(&config, 1.0) - 4.0 / 60.0).abs() < 1e-7);
        assert_eq!(step_depth(&config, 0.0), 0.0);
    }

    #[test]
    fn test_negative_and_nan_dt_clamped() {
        let config = TunnelConfig::default();
        assert_eq!(step_depth(&config, -1.0), 0.0);
        assert_eq!(step_depth(&config, f32::NAN), 0.0);
        assert_eq!(step_depth(&config, f32::INFINITY), 0.0);
    }

    #[test]
    fn test_frozen_tunnel_never_moves() {
        let config = TunnelConfig::default().with_particle_count(50).with_speed(0.0);
        let mut store = Spawner::from_seed(4).spawn(&config);
        let depths = store.depths().to_vec();

        for _ in 0..100 {
            assert_eq!(advance(&mut store, step_depth(&config, 1.0)), 0);
        }
        assert_eq!(store.depths(), depths.as_slice());
    }

    #[test]
    fn test_recycles_to_exactly_one() {
        let mut depth = 0.05;
        assert!(advance_depth(&mut depth, 4.0 / 60.0));
        assert_eq!(depth, 1.0);
    }

    #[test]
    fn test_exact_zero_recycles() {
        let mut depth = 0.25;
        assert!(advance_depth(&mut depth, 0.25));
        assert_eq!(depth, 1.0);
    }

    #[test]
    fn test_advance_without_recycle() {
        let mut depth = 0.5;
        assert!(!advance_depth(&mut depth, 0.125));
        assert_eq!(depth, 0.375);
    }

    #[test]
    fn test_advance_keeps_ring_slots() {
        let config = TunnelConfig::default().with_particle_count(500);
        let mut store = Spawner::from_seed(11).spawn(&config);
        let angles = store.angles().to_vec();
        let radii = store.radii().to_vec();

        let mut recycled = 0;
        for _ in 0..2_000 {
            recycled += advance(&mut store, step_depth(&config, 1.0 / 60.0));
            assert!(store.depths().iter().all(|d| *d > 0.0 && *d <= 1.0));
        }

        // 33 s of frames against a 15 s period: every particle recycles at least twice
        assert!(recycled >= 1000);
        assert_eq!(store.angles(), angles.as_slice());
        assert_eq!(store.radii(), radii.as_slice());
    }

    #[test]
    fn test_sawtooth_period() {
        let config = TunnelConfig::default()
            .with_particle_count(1)
            .with_speed(4.0)
            .with_distances(0.4, 64.0);
        let mut store = ParticleStore::from_parts(vec![1.0], vec![0.0], vec![2.0]).unwrap();

        // period is 16 s and each 1 s step is exactly 1/16
        let mut recycle_frames = Vec::new();
        for frame in 1..=48 {
            if advance(&mut store, step_depth(&config, 1.0)) == 1 {
                recycle_frames.push(frame);
            }
        }
        assert_eq!(recycle_frames.len(), 3);
        assert!(recycle_frames.windows(2).all(|w| w[1] - w[0] == 16));
    }
}
