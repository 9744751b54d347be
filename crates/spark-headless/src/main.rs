use anyhow::{bail, Context};
use glam::Vec2;
use instant::Instant;
use spark_core::{
    DeviceProfile, DrawSurface, EffectOptions, EffectScheduler, EngineSettings, Environment,
    LinkDraw, ParticleDraw, Ripple, RippleDraw, SurfaceError,
};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
const ORBIT_RADIUS: f32 = 220.0;
const ORBIT_PERIOD_MS: f64 = 2400.0;
const TAP_EVERY: usize = 90; // frames
const REPORT_EVERY: usize = 60; // frames

/// Counts draw calls instead of painting them.
#[derive(Default)]
struct TallySurface {
    fades: u64,
    links: u64,
    particles: u64,
    ripples: u64,
}

impl DrawSurface for TallySurface {
    fn fade(&mut self, _alpha: f32) -> Result<(), SurfaceError> {
        self.fades += 1;
        Ok(())
    }

    fn draw_link(&mut self, _link: &LinkDraw) -> Result<(), SurfaceError> {
        self.links += 1;
        Ok(())
    }

    fn draw_particle(&mut self, _particle: &ParticleDraw) -> Result<(), SurfaceError> {
        self.particles += 1;
        Ok(())
    }

    fn draw_ripple(&mut self, _ripple: &RippleDraw) -> Result<(), SurfaceError> {
        self.ripples += 1;
        Ok(())
    }
}

struct Args {
    frames: usize,
    seed: u64,
    frame_ms: f64,
    options: EffectOptions,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        frames: 600,
        seed: 42,
        frame_ms: 1000.0 / 60.0,
        options: EffectOptions::new(),
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--frames" => args.frames = value()?.parse().context("--frames")?,
            "--seed" => args.seed = value()?.parse().context("--seed")?,
            "--fps" => {
                let fps: f64 = value()?.parse().context("--fps")?;
                if !(fps.is_finite() && fps > 0.0) {
                    bail!("--fps must be positive");
                }
                args.frame_ms = 1000.0 / fps;
            }
            "--quality" => {
                let mode = value()?;
                args.options.set("performanceMode", mode.as_str());
            }
            "--max-particles" => {
                let n: f64 = value()?.parse().context("--max-particles")?;
                args.options.set("maxParticles", n);
            }
            "--no-links" => args.options.set("showConnections", false),
            other => bail!("unknown argument `{other}`"),
        }
    }
    Ok(args)
}

/// Pointer position on a circular orbit around the viewport centre.
fn orbit(now_ms: f64) -> Vec2 {
    let angle = (now_ms / ORBIT_PERIOD_MS * std::f64::consts::TAU) as f32;
    Vec2::new(WIDTH / 2.0, HEIGHT / 2.0) + Vec2::new(angle.cos(), angle.sin()) * ORBIT_RADIUS
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args()?;
    let settings = EngineSettings::from_options(&args.options);
    let mut engine: EffectScheduler<TallySurface> = EffectScheduler::new(settings, args.seed);

    let env = Environment {
        reduced_motion: false,
        device: DeviceProfile {
            is_mobile: false,
            pixel_ratio: 1.0,
            width: WIDTH as f64,
            height: HEIGHT as f64,
        },
    };
    if !engine.initialize(&env, 0.0, || Ok(TallySurface::default())) || !engine.start(0.0) {
        bail!("engine refused to start");
    }

    // The pointer orbits for the first two thirds, then leaves.
    let leave_at = args.frames * 2 / 3;
    let started = Instant::now();
    let mut now = 0.0;
    for frame in 1..=args.frames {
        now += args.frame_ms;
        if frame < leave_at {
            let p = orbit(now);
            engine.pointer_moved(p.x, p.y, now);
            if frame % TAP_EVERY == 0 {
                engine.spawn_effect(Box::new(Ripple::new(p, 200.0)));
            }
        } else if frame == leave_at {
            engine.pointer_left(now);
        }

        engine.tick(now);

        if frame % REPORT_EVERY == 0 {
            let stats = engine.stats();
            let field = engine.field_stats();
            let motion = engine.motion_stats();
            log::info!(
                "[frame {:>5}] fps={} quality={} particles={}/{} energy={:.2} speed={} trend={}",
                frame,
                stats.fps,
                stats.quality_level.as_str(),
                field.particle_count,
                field.max_particles,
                field.average_energy,
                motion.speed,
                motion.trend.as_str()
            );
        }
    }
    let elapsed = started.elapsed();

    if let Some(surface) = engine.surface() {
        log::info!(
            "draw calls: fades={} links={} particles={} ripples={}",
            surface.fades,
            surface.links,
            surface.particles,
            surface.ripples
        );
    }
    log::info!(
        "simulated {} frames ({:.1}s of animation) in {:.1}ms, {:.3}ms/frame",
        args.frames,
        now / 1000.0,
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / args.frames.max(1) as f64
    );

    engine.destroy();
    Ok(())
}
