//! Tunnel builder and per-frame orchestration.

use crate::config::TunnelConfig;
use crate::error::{ConfigError, Result};
use crate::geometry::map_particle;
use crate::output::{RenderSink, TunnelParticle};
use crate::pose::{Pose, PoseProvider};
use crate::spawn::Spawner;
use crate::step;
use crate::store::ParticleStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A tunnel builder.
///
/// Use method chaining to configure, then call `.build()`.
pub struct TunnelBuilder {
    config: TunnelConfig,
    spawner: Option<Spawner>,
    initial_state: Option<ParticleStore>,
    pose_provider: Option<Box<dyn PoseProvider>>,
    render_sink: Option<Box<dyn RenderSink>>,
}

impl TunnelBuilder {
    fn new(config: TunnelConfig) -> Self {
        Self {
            config,
            spawner: None,
            initial_state: None,
            pose_provider: None,
            render_sink: None,
        }
    }

    /// Seed the initial particle state. Without a seed, OS entropy is used.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawner = Some(Spawner::from_seed(seed));
        self
    }

    /// Use a specific spawner for initial and respawned particle state.
    pub fn with_spawner(mut self, spawner: Spawner) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Start from explicit particle state instead of spawning it.
    ///
    /// The store must hold exactly `particle_count` particles. The spawner
    /// is still used by [`WarpTunnel::respawn`].
    pub fn with_initial_state(mut self, store: ParticleStore) -> Self {
        self.initial_state = Some(store);
        self
    }

    /// Set where the viewer pose comes from each frame.
    pub fn with_pose_provider<P>(mut self, provider: P) -> Self
    where
        P: PoseProvider + 'static,
    {
        self.pose_provider = Some(Box::new(provider));
        self
    }

    /// Set where each frame's particle buffer is submitted.
    pub fn with_render_sink<S>(mut self, sink: S) -> Self
    where
        S: RenderSink + 'static,
    {
        self.render_sink = Some(Box::new(sink));
        self
    }

    /// Validate the config and spawn the tunnel.
    ///
    /// An invalid config is an error. A missing pose provider or render sink
    /// is not: the tunnel is built inert and every frame is a no-op.
    pub fn build(self) -> Result<WarpTunnel> {
        self.config.validate()?;
        if let Some(store) = &self.initial_state {
            if store.len() != self.config.count() {
                return Err(ConfigError::StateMismatch {
                    expected: self.config.count(),
                    actual: store.len(),
                });
            }
        }

        let (pose_provider, render_sink) = match (self.pose_provider, self.render_sink) {
            (Some(pose), Some(sink)) => (pose, sink),
            (pose, sink) => {
                log::warn!(
                    "warp tunnel is inert: pose provider {}, render sink {}",
                    if pose.is_some() { "present" } else { "missing" },
                    if sink.is_some() { "present" } else { "missing" },
                );
                return Ok(WarpTunnel {
                    config: self.config,
                    state: None,
                    frame_count: 0,
                });
            }
        };

        let mut spawner = self.spawner.unwrap_or_default();
        let store = match self.initial_state {
            Some(store) => store,
            None => spawner.spawn(&self.config),
        };
        let output = vec![TunnelParticle::default(); store.len()];
        log::info!(
            "spawned {} tunnel particles (cycle period {:.2}s)",
            store.len(),
            self.config.cycle_period()
        );

        let mut tunnel = WarpTunnel {
            config: self.config,
            state: Some(Box::new(Active {
                store,
                output,
                spawner,
                pose_provider,
                render_sink,
            })),
            frame_count: 0,
        };
        tunnel.publish_spawned();
        Ok(tunnel)
    }
}

/// Everything a live tunnel owns. Absent while inert.
struct Active {
    store: ParticleStore,
    output: Vec<TunnelParticle>,
    spawner: Spawner,
    pose_provider: Box<dyn PoseProvider>,
    render_sink: Box<dyn RenderSink>,
}

/// Summary of one simulated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// 1-based index of the frame.
    pub frame: u64,
    /// Depth every particle travelled this frame.
    pub step: f32,
    /// Particles that reached the near plane and went back to depth 1.
    pub recycled: usize,
}

/// A flowing, camera-relative tunnel of recycled particles.
///
/// ```ignore
/// let mut tunnel = WarpTunnel::builder(TunnelConfig::default())
///     .with_seed(7)
///     .with_pose_provider(Camera::new())
///     .with_render_sink(|particles: &[TunnelParticle]| upload(particles))
///     .build()?;
///
/// loop {
///     tunnel.frame(time.update());
/// }
/// ```
pub struct WarpTunnel {
    config: TunnelConfig,
    state: Option<Box<Active>>,
    frame_count: u64,
}

impl WarpTunnel {
    /// Start configuring a tunnel.
    pub fn builder(config: TunnelConfig) -> TunnelBuilder {
        TunnelBuilder::new(config)
    }

    /// Run one frame: sample the pose, step every particle, map every
    /// particle, submit the buffer.
    ///
    /// Returns `None` when nothing ran, either because the tunnel is inert or
    /// because the pose provider had no pose this frame.
    pub fn frame(&mut self, dt: f32) -> Option<FrameStats> {
        let active = self.state.as_deref_mut()?;

        let Some(pose) = active.pose_provider.sample() else {
            log::debug!("no viewer pose, skipping tunnel frame");
            return None;
        };

        let step = step::step_depth(&self.config, dt);
        let recycled = step::advance(&mut active.store, step);
        map_all(&active.store, &pose, &self.config, &mut active.output);
        active.render_sink.submit(&active.output);

        self.frame_count += 1;
        log::trace!("tunnel frame {}: {} recycled", self.frame_count, recycled);

        Some(FrameStats {
            frame: self.frame_count,
            step,
            recycled,
        })
    }

    /// Draw fresh ring slots and depths for every particle and publish them.
    ///
    /// Continues the spawner's random stream, so a seeded tunnel respawns
    /// deterministically. No-op while inert.
    pub fn respawn(&mut self) {
        let Some(active) = self.state.as_deref_mut() else {
            return;
        };
        active.spawner.reseed(&mut active.store, &self.config);
        log::debug!("respawned {} tunnel particles", active.store.len());
        self.publish_spawned();
    }

    /// Map the freshly spawned state with the current pose and submit it, so
    /// the tunnel is visible before its first step.
    fn publish_spawned(&mut self) {
        let Some(active) = self.state.as_deref_mut() else {
            return;
        };
        let Some(pose) = active.pose_provider.sample() else {
            return;
        };
        map_all(&active.store, &pose, &self.config, &mut active.output);
        active.render_sink.submit(&active.output);
    }

    #[inline]
    pub fn config(&self) -> &TunnelConfig {
        &self.config
    }

    /// Whether the tunnel was built without a pose provider or render sink.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.state.is_none()
    }

    /// Number of frames simulated so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Persistent particle state, if the tunnel is live.
    pub fn store(&self) -> Option<&ParticleStore> {
        self.state.as_deref().map(|active| &active.store)
    }

    /// The last published particle buffer. Empty while inert.
    pub fn particles(&self) -> &[TunnelParticle] {
        self.state
            .as_deref()
            .map(|active| active.output.as_slice())
            .unwrap_or(&[])
    }
}

/// Recompute every output record from the store.
fn map_all(
    store: &ParticleStore,
    pose: &Pose,
    config: &TunnelConfig,
    output: &mut [TunnelParticle],
) {
    let write = |out: &mut TunnelParticle, depth: f32, angle: f32, radius: f32| {
        let (position, size, color) = map_particle(depth, angle, radius, pose, config);
        *out = TunnelParticle::new(position, size, color);
    };

    #[cfg(feature = "parallel")]
    output
        .par_iter_mut()
        .zip(store.depths().par_iter())
        .zip(store.angles().par_iter())
        .zip(store.radii().par_iter())
        .for_each(|(((out, &depth), &angle), &radius)| write(out, depth, angle, radius));

    #[cfg(not(feature = "parallel"))]
    output
        .iter_mut()
        .zip(store.depths())
        .zip(store.angles())
        .zip(store.radii())
        .for_each(|(((out, &depth), &angle), &radius)| write(out, depth, angle, radius));
}
