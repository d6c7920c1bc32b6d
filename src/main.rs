//! Headless tunnel runner.
//!
//! Usage: `warp-tunnel [config.json] [frames]`
//!
//! Steps a tunnel at a fixed 60 fps with a slowly orbiting camera and logs a
//! summary of the particle buffer once per simulated second. Set `RUST_LOG`
//! to control verbosity.

use anyhow::Context;
use warp_tunnel::prelude::*;

const FPS: u32 = 60;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => TunnelConfig::load(&path)
            .with_context(|| format!("failed to load tunnel config from {path}"))?,
        None => TunnelConfig::default(),
    };
    let frames: u64 = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid frame count {n:?}"))?,
        None => 10 * u64::from(FPS),
    };

    let mut camera = Camera::new();
    let pose_provider = move || {
        camera.orbit(0.002, 0.0);
        Some(camera.pose())
    };

    let mut submitted = 0u64;
    let render_sink = move |particles: &[TunnelParticle]| {
        submitted += 1;
        if submitted % u64::from(FPS) != 0 {
            return;
        }
        let count = particles.len() as f32;
        let centroid = particles.iter().map(TunnelParticle::position).sum::<Vec3>() / count;
        let mean_size = particles.iter().map(|p| p.size).sum::<f32>() / count;
        log::info!(
            "buffer {}: {} particles, centroid {:.2?}, mean size {:.3}",
            submitted,
            particles.len(),
            centroid,
            mean_size
        );
    };

    let mut tunnel = WarpTunnel::builder(config)
        .with_pose_provider(pose_provider)
        .with_render_sink(render_sink)
        .build()
        .context("invalid tunnel config")?;

    let mut time = Time::fixed(1.0 / FPS as f32);
    let mut session = Session::start(Envelope::new(frames as f32 / FPS as f32, 0.6));
    let mut recycled = 0usize;

    for _ in 0..frames {
        let dt = time.update();
        if let Some(stats) = tunnel.frame(dt) {
            recycled += stats.recycled;
        }
        if let Some(intensity) = session.advance(dt) {
            if time.frame() % u64::from(FPS) == 0 {
                log::debug!("t={:.1}s intensity {:.3}", time.elapsed(), intensity);
            }
        }
    }

    log::info!(
        "simulated {} frames ({:.1}s), {} recycles",
        tunnel.frame_count(),
        time.elapsed(),
        recycled
    );
    Ok(())
}
