// Integration tests for the scheduler lifecycle and frame loop.

use glam::Vec2;
use spark_core::*;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct RecordingSurface {
    fades: Vec<f32>,
    links: usize,
    particles: usize,
    ripples: usize,
    fail: bool,
}

impl DrawSurface for RecordingSurface {
    fn fade(&mut self, alpha: f32) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Backend("context lost".into()));
        }
        self.fades.push(alpha);
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

fn desktop() -> Environment {
    Environment {
        reduced_motion: false,
        device: DeviceProfile {
            is_mobile: false,
            pixel_ratio: 2.0,
            width: 2560.0,
            height: 1440.0,
        },
    }
}

fn running() -> EffectScheduler<RecordingSurface> {
    let mut engine = EffectScheduler::new(EngineSettings::default(), 11);
    assert!(engine.initialize(&desktop(), 0.0, || Ok(RecordingSurface::default())));
    assert!(engine.start(0.0));
    engine
}

/// Sweep the pointer right at 2000 units/s, one sample and one frame every 20ms.
fn sweep(engine: &mut EffectScheduler<RecordingSurface>, from_ms: f64, frames: usize) -> f64 {
    let mut now = from_ms;
    for _ in 0..frames {
        now += 20.0;
        engine.pointer_moved((now * 2.0) as f32, 300.0, now);
        engine.tick(now);
    }
    now
}

#[test]
fn lifecycle_transitions() {
    let mut engine: EffectScheduler<RecordingSurface> =
        EffectScheduler::new(EngineSettings::default(), 1);
    assert_eq!(engine.state(), EngineState::Idle);

    // Not initialised yet.
    assert!(!engine.start(0.0));
    assert!(engine.initialize(&desktop(), 0.0, || Ok(RecordingSurface::default())));
    assert!(!engine.initialize(&desktop(), 0.0, || Ok(RecordingSurface::default())));

    assert!(!engine.pause());
    assert!(engine.start(0.0));
    assert_eq!(engine.state(), EngineState::Running);
    assert!(!engine.start(1.0));

    assert!(engine.pause());
    assert_eq!(engine.state(), EngineState::Paused);
    assert!(!engine.tick(16.0));
    assert!(engine.resume(500.0));

    assert!(engine.stop());
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(engine.surface().map(|s| s.fades.last().copied()), Some(Some(1.0)));
    assert!(!engine.tick(600.0));

    // Idle can start again.
    assert!(engine.start(700.0));
    engine.destroy();
    assert_eq!(engine.state(), EngineState::Destroyed);
    assert!(!engine.start(800.0));
    assert!(!engine.initialize(&desktop(), 0.0, || Ok(RecordingSurface::default())));
    assert!(engine.surface().is_none());
}

#[test]
fn auto_mode_uses_the_device_class() {
    let engine = running();
    assert_eq!(engine.stats().quality_level, QualityLevel::High);
    assert_eq!(engine.field().capacity(), 50);

    let mut phone: EffectScheduler<RecordingSurface> =
        EffectScheduler::new(EngineSettings::default(), 1);
    let env = Environment {
        device: DeviceProfile {
            is_mobile: true,
            ..Default::default()
        },
        ..desktop()
    };
    assert!(phone.initialize(&env, 0.0, || Ok(RecordingSurface::default())));
    assert_eq!(phone.stats().quality_level, QualityLevel::Low);
    assert_eq!(phone.field().capacity(), 20);
}

#[test]
fn reduced_motion_never_allocates_a_surface() {
    let mut engine: EffectScheduler<RecordingSurface> =
        EffectScheduler::new(EngineSettings::default(), 1);
    let env = Environment {
        reduced_motion: true,
        ..desktop()
    };
    let called = Cell::new(false);
    let ok = engine.initialize(&env, 0.0, || {
        called.set(true);
        Ok(RecordingSurface::default())
    });
    assert!(!ok);
    assert!(!called.get());
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(engine.surface().is_none());

    // With accessibility off the preference is not honoured.
    let settings = EngineSettings {
        enable_accessibility: false,
        ..Default::default()
    };
    let mut engine: EffectScheduler<RecordingSurface> = EffectScheduler::new(settings, 1);
    assert!(engine.initialize(&env, 0.0, || Ok(RecordingSurface::default())));
}

#[test]
fn surface_factory_failure_leaves_the_engine_idle() {
    let mut engine: EffectScheduler<RecordingSurface> =
        EffectScheduler::new(EngineSettings::default(), 1);
    let ok = engine.initialize(&desktop(), 0.0, || {
        Err(SurfaceError::Unavailable("no 2d context".into()))
    });
    assert!(!ok);
    assert!(!engine.is_initialized());
    assert!(!engine.start(0.0));
    // A later attempt can still succeed.
    assert!(engine.initialize(&desktop(), 0.0, || Ok(RecordingSurface::default())));
}

#[test]
fn runtime_reduced_motion_stops_and_blocks_resume() {
    let mut engine = running();
    assert!(engine.set_reduced_motion(true));
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(!engine.start(100.0));

    assert!(!engine.set_reduced_motion(false));
    assert!(engine.start(200.0));

    assert!(engine.pause());
    engine.set_reduced_motion(true);
    assert!(!engine.resume(300.0));
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn reduced_motion_reports_stopping_a_paused_engine() {
    let mut engine = running();
    assert!(engine.pause());
    assert!(engine.set_reduced_motion(true));
    assert_eq!(engine.state(), EngineState::Idle);

    // Already idle: nothing more to stop.
    assert!(!engine.set_reduced_motion(false));
    assert!(!engine.set_reduced_motion(true));

    assert!(!engine.set_reduced_motion(false));
    assert!(engine.start(400.0));
}

#[test]
fn ticks_fade_spawn_and_draw() {
    let mut engine = running();
    let now = sweep(&mut engine, 0.0, 20);

    let surface = engine.surface().expect("surface");
    assert_eq!(surface.fades.len(), 20);
    assert!((surface.fades[0] - 0.05).abs() < 1e-6);
    assert!(surface.particles > 0);

    let stats = engine.field_stats();
    assert!(stats.particle_count > 0);
    assert!(stats.particle_count <= 50);
    assert!(engine.latest_signal().is_some());
    assert!(engine.tick(now + 16.0));
}

#[test]
fn stats_report_rounded_timing() {
    let mut engine = running();
    engine.tick(16.667);
    let stats = engine.stats();
    assert_eq!(stats.fps, 60.0);
    assert_eq!(stats.frame_time_ms, 16.67);
    assert!(stats.is_running);
    assert_eq!(stats.effect_count, 0);
}

#[test]
fn sustained_slow_frames_degrade_quality() {
    let mut settings = EngineSettings::default();
    settings.performance_mode = PerformanceMode::Fixed(QualityLevel::High);
    let mut engine: EffectScheduler<RecordingSurface> = EffectScheduler::new(settings, 5);
    assert!(engine.initialize(&desktop(), 0.0, || Ok(RecordingSurface::default())));
    assert!(engine.start(0.0));

    // 20fps
    let mut now = 0.0;
    for _ in 0..59 {
        now += 50.0;
        engine.tick(now);
    }
    assert_eq!(engine.stats().quality_level, QualityLevel::High);

    now += 50.0;
    engine.tick(now);
    assert_eq!(engine.stats().quality_level, QualityLevel::Medium);
    assert_eq!(engine.monitor().effect_cap(), 12);
    assert_eq!(engine.field().capacity(), 35);
}

#[test]
fn resume_does_not_simulate_the_pause() {
    let mut engine = running();
    let now = sweep(&mut engine, 0.0, 5);
    let before = engine.monitor().frame_count();

    assert!(engine.pause());
    assert!(engine.resume(now + 10_000.0));
    assert!(engine.tick(now + 10_016.0));
    assert_eq!(engine.monitor().frame_count(), before + 1);
    assert!((engine.monitor().frame_time_ms() - 16.0).abs() < 1e-3);
}

#[test]
fn surface_errors_do_not_stop_the_loop() {
    let mut engine = running();
    if let Some(surface) = engine.surface_mut() {
        surface.fail = true;
    }
    assert!(engine.tick(16.0));
    assert!(engine.tick(32.0));
    assert_eq!(engine.draw_faults(), 2);
    assert_eq!(engine.state(), EngineState::Running);

    if let Some(surface) = engine.surface_mut() {
        surface.fail = false;
    }
    assert!(engine.tick(48.0));
    assert_eq!(engine.draw_faults(), 2);
    assert_eq!(engine.surface().map(|s| s.fades.len()), Some(1));
}

#[test]
fn pointer_leave_fades_the_signal_out() {
    let mut engine = running();
    let mut now = sweep(&mut engine, 0.0, 10);
    let moving = engine.latest_signal().expect("signal").speed;

    engine.pointer_left(now);
    let first = engine.latest_signal().expect("fading").speed;
    assert!(first < moving);

    let mut frames = 0;
    while engine.latest_signal().is_some() {
        now += 16.0;
        engine.tick(now);
        frames += 1;
        assert!(frames < 500, "signal never faded");
    }
    assert!(engine.motion().speed() <= 1.0);

    // Field keeps running and eventually empties.
    for _ in 0..130 {
        now += 16.0;
        engine.tick(now);
    }
    assert_eq!(engine.field_stats().particle_count, 0);
}

#[test]
fn touch_input_drives_the_field() {
    let mut engine = running();
    let mut now = 0.0;
    let start = [TouchPoint { id: 3, x: 100.0, y: 100.0 }];
    now += 20.0;
    engine.touch_start(&start, now);
    for step in 1..=10 {
        now += 20.0;
        let touch = [TouchPoint {
            id: 3,
            x: 100.0 + step as f32 * 40.0,
            y: 100.0,
        }];
        engine.touch_move(&touch, now);
        engine.tick(now);
    }
    assert!(engine.motion().is_touch());
    assert!(engine.latest_signal().is_some_and(|s| s.is_touch));
    assert!(engine.field_stats().particle_count > 0);

    engine.touch_end(&[], now);
    assert!(!engine.motion().is_touch());
}

#[test]
fn effects_respect_the_cap_and_expire() {
    let mut engine = running();
    let cap = engine.monitor().effect_cap();
    assert_eq!(cap, 15);

    for i in 0..cap {
        assert!(engine.spawn_effect(Box::new(Ripple::new(Vec2::new(i as f32, 0.0), 200.0))));
    }
    assert!(!engine.spawn_effect(Box::new(Ripple::new(Vec2::ZERO, 200.0))));
    assert_eq!(engine.stats().effect_count, cap);

    engine.tick(16.0);
    assert_eq!(engine.surface().map(|s| s.ripples), Some(cap));

    // Ripples last 600ms.
    let mut now = 16.0;
    for _ in 0..5 {
        now += 150.0;
        engine.tick(now);
    }
    assert_eq!(engine.effect_count(), 0);

    engine.pause();
    assert!(!engine.spawn_effect(Box::new(Ripple::new(Vec2::ZERO, 200.0))));
}

#[test]
fn destroy_releases_subscriptions_exactly_once() {
    let released = Rc::new(Cell::new(0));
    let mut engine = running();

    let subs: Vec<Subscription> = (0..3)
        .map(|_| {
            let released = Rc::clone(&released);
            Subscription::new("test", move || released.set(released.get() + 1))
        })
        .collect();
    engine.hold(subs);
    assert_eq!(engine.subscription_count(), 3);
    assert_eq!(released.get(), 0);

    engine.destroy();
    assert_eq!(released.get(), 3);
    engine.destroy();
    assert_eq!(released.get(), 3);
    assert_eq!(engine.subscription_count(), 0);

    // Handed over after destroy: released immediately.
    let late = Rc::clone(&released);
    engine.hold([Subscription::new("late", move || late.set(late.get() + 1))]);
    assert_eq!(released.get(), 4);
}

#[test]
fn dropped_subscription_releases_once() {
    let released = Rc::new(Cell::new(0));
    let counter = Rc::clone(&released);
    let mut sub = Subscription::new("drop", move || counter.set(counter.get() + 1));
    assert!(sub.is_active());
    sub.release();
    assert!(!sub.is_active());
    drop(sub);
    assert_eq!(released.get(), 1);
}

#[test]
fn settings_updates_apply_live() {
    let mut engine = running();
    let options = EffectOptions::new()
        .with("maxParticles", 12.0)
        .with("fadeRate", 0.8)
        .with("somethingElse", true);
    assert_eq!(engine.update_settings(&options), 2);
    assert_eq!(engine.field().capacity(), 12);

    engine.tick(16.0);
    let fade = engine.surface().and_then(|s| s.fades.last().copied());
    assert!(fade.is_some_and(|a| (a - 0.2).abs() < 1e-6));

    sweep(&mut engine, 16.0, 30);
    assert!(engine.field_stats().particle_count <= 12);
}
