//! The effect lifecycle and per-frame cadence.
//!
//! `EffectScheduler` owns the estimator, the field, the quality controller
//! and the drawing surface. The host forwards raw input and calls
//! [`EffectScheduler::tick`] once per animation frame; everything else
//! happens here.

use crate::config::{EffectOptions, EngineSettings, PerformanceMode};
use crate::constants::*;
use crate::draw::DrawList;
use crate::effects::Effect;
use crate::error::SurfaceError;
use crate::field::{FieldStats, ParticleField};
use crate::motion::{MotionEstimator, MotionSignal, MotionStats, TouchPoint};
use crate::quality::{DeviceProfile, PerformanceMonitor, QualityLevel};
use crate::surface::{DrawSurface, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Destroyed,
}

impl EngineState {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Paused => "paused",
            EngineState::Destroyed => "destroyed",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Environment {
    pub reduced_motion: bool,
    pub device: DeviceProfile,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub quality_level: QualityLevel,
    pub effect_count: usize,
    pub is_running: bool,
}

pub struct EffectScheduler<S: DrawSurface> {
    state: EngineState,
    initialized: bool,
    settings: EngineSettings,
    motion: MotionEstimator,
    field: ParticleField,
    monitor: PerformanceMonitor,
    effects: Vec<Box<dyn Effect>>,
    surface: Option<S>,
    subscriptions: Vec<Subscription>,
    latest_signal: Option<MotionSignal>,
    // pointer gone; decay the signal once per tick until it drops out
    stopping: bool,
    reduced_motion: bool,
    last_frame_ms: f64,
    draw_faults: u64,
}

impl<S: DrawSurface> EffectScheduler<S> {
    pub fn new(settings: EngineSettings, seed: u64) -> Self {
        let level = QualityLevel::Medium;
        Self {
            state: EngineState::Idle,
            initialized: false,
            monitor: PerformanceMonitor::new(level, level.max_effects(), settings.max_effects),
            field: ParticleField::new(settings.field.clone(), seed),
            settings,
            motion: MotionEstimator::new(),
            effects: Vec::new(),
            surface: None,
            subscriptions: Vec::new(),
            latest_signal: None,
            stopping: false,
            reduced_motion: false,
            last_frame_ms: 0.0,
            draw_faults: 0,
        }
    }

    /// Prepare the scheduler for `start`. `make_surface` is only called once
    /// every other precondition holds, so a refused initialisation allocates
    /// nothing.
    pub fn initialize<F>(&mut self, env: &Environment, now_ms: f64, make_surface: F) -> bool
    where
        F: FnOnce() -> Result<S, SurfaceError>,
    {
        if self.state == EngineState::Destroyed {
            log::warn!("[engine] initialize after destroy ignored");
            return false;
        }
        if self.initialized {
            log::debug!("[engine] already initialised");
            return false;
        }

        self.reduced_motion = env.reduced_motion;
        if self.motion_blocked() {
            log::info!("[engine] reduced motion preferred; effect disabled");
            return false;
        }

        let surface = match make_surface() {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("[engine] initialisation failed: {}", e);
                return false;
            }
        };
        self.surface = Some(surface);

        let level = match self.settings.performance_mode {
            PerformanceMode::Auto => env.device.initial_quality(),
            PerformanceMode::Fixed(level) => level,
        };
        self.monitor = PerformanceMonitor::new(level, level.max_effects(), self.settings.max_effects);
        self.field.apply_quality(level);
        self.motion.start_tracking(now_ms);
        self.initialized = true;

        log::info!(
            "[engine] initialised (quality {}, {} particles max)",
            level.as_str(),
            self.field.capacity()
        );
        true
    }

    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.state != EngineState::Idle || !self.initialized {
            return false;
        }
        if self.motion_blocked() {
            log::debug!("[engine] start refused: reduced motion");
            return false;
        }
        self.state = EngineState::Running;
        self.last_frame_ms = now_ms;
        log::info!("[engine] started");
        true
    }

    /// Back to Idle with the surface cleared. The simulation is kept.
    pub fn stop(&mut self) -> bool {
        if !matches!(self.state, EngineState::Running | EngineState::Paused) {
            return false;
        }
        self.state = EngineState::Idle;
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.fade(1.0) {
                log::warn!("[engine] clear on stop failed: {}", e);
            }
        }
        log::info!("[engine] stopped");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.state = EngineState::Paused;
        log::debug!("[engine] paused");
        true
    }

    /// Continue from `now_ms`; the time spent paused is not simulated.
    pub fn resume(&mut self, now_ms: f64) -> bool {
        if self.state != EngineState::Paused || self.motion_blocked() {
            return false;
        }
        self.state = EngineState::Running;
        self.last_frame_ms = now_ms;
        log::debug!("[engine] resumed");
        true
    }

    /// Release the surface and every held subscription. Terminal; repeated
    /// calls do nothing.
    pub fn destroy(&mut self) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.stop();
        self.state = EngineState::Destroyed;

        self.subscriptions.clear();
        self.surface = None;
        self.effects.clear();
        self.field.clear();
        self.motion.stop_tracking();
        self.motion.reset();
        self.latest_signal = None;
        self.stopping = false;
        log::info!("[engine] destroyed");
    }

    /// Run one frame. Returns whether another frame should be scheduled.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.state != EngineState::Running {
            return false;
        }

        let delta_ms = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        if self.monitor.record_frame(delta_ms).is_some() {
            self.field.apply_quality(self.monitor.level());
        }

        if self.stopping {
            self.latest_signal = self.motion.signal_movement_stop(now_ms);
            self.stopping = self.latest_signal.is_some();
        }

        let step_ms = if delta_ms.is_finite() {
            delta_ms.clamp(0.0, MAX_STEP_MS) as f32
        } else {
            0.0
        };
        self.field.update(step_ms, self.latest_signal.as_ref());
        self.effects.retain_mut(|effect| effect.update(step_ms));

        if let Some(surface) = self.surface.as_mut() {
            let frame = self.field.draw_list();
            let fade_alpha = 1.0 - self.settings.fade_rate;
            if let Err(e) = paint(surface, fade_alpha, &frame, &self.effects) {
                self.draw_faults += 1;
                log::warn!(
                    "[frame] draw failed on frame {}: {}",
                    self.monitor.frame_count(),
                    e
                );
            }
        }
        true
    }

    // ---------------- Input ----------------

    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64) {
        if let Some(signal) = self.motion.mouse_moved(x, y, now_ms) {
            self.accept(signal);
        }
    }

    pub fn pointer_left(&mut self, now_ms: f64) {
        if self.motion.is_tracking() {
            self.latest_signal = self.motion.mouse_left(now_ms);
            self.stopping = self.latest_signal.is_some();
        }
    }

    pub fn touch_start(&mut self, touches: &[TouchPoint], now_ms: f64) {
        if let Some(signal) = self.motion.touch_start(touches, now_ms) {
            self.accept(signal);
        }
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint], now_ms: f64) {
        if let Some(signal) = self.motion.touch_move(touches, now_ms) {
            self.accept(signal);
        }
    }

    pub fn touch_end(&mut self, remaining: &[TouchPoint], now_ms: f64) {
        let was_touch = self.motion.is_touch();
        let signal = self.motion.touch_end(remaining, now_ms);
        if was_touch && !self.motion.is_touch() {
            self.latest_signal = signal;
            self.stopping = signal.is_some();
        }
    }

    fn accept(&mut self, signal: MotionSignal) {
        self.latest_signal = Some(signal);
        self.stopping = false;
    }

    // ---------------- Host integration ----------------

    /// Keep `subscriptions` alive until destroy. Handed over after destroy
    /// they are released straight away.
    pub fn hold(&mut self, subscriptions: impl IntoIterator<Item = Subscription>) {
        if self.state == EngineState::Destroyed {
            drop(subscriptions.into_iter().collect::<Vec<_>>());
            return;
        }
        self.subscriptions.extend(subscriptions);
    }

    /// Returns `true` when the change stopped a running or paused engine.
    pub fn set_reduced_motion(&mut self, active: bool) -> bool {
        if self.reduced_motion == active {
            return false;
        }
        self.reduced_motion = active;
        log::info!("[engine] reduced motion {}", if active { "on" } else { "off" });
        self.motion_blocked() && self.stop()
    }

    /// Queue a transient effect. Refused unless running and below the current
    /// effect cap.
    pub fn spawn_effect(&mut self, effect: Box<dyn Effect>) -> bool {
        if self.state != EngineState::Running || self.effects.len() >= self.monitor.effect_cap() {
            return false;
        }
        self.effects.push(effect);
        true
    }

    pub fn update_settings(&mut self, options: &EffectOptions) -> usize {
        let applied = self.settings.merge(options);
        self.field.apply_settings(self.settings.field.clone());
        self.monitor.set_effect_ceiling(self.settings.max_effects);
        if self.motion_blocked() {
            self.stop();
        }
        log::debug!("[engine] {} option(s) applied", applied);
        applied
    }

    fn motion_blocked(&self) -> bool {
        self.settings.enable_accessibility && self.reduced_motion
    }

    // ---------------- Queries ----------------

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn latest_signal(&self) -> Option<&MotionSignal> {
        self.latest_signal.as_ref()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn motion(&self) -> &MotionEstimator {
        &self.motion
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn draw_faults(&self) -> u64 {
        self.draw_faults
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            fps: self.monitor.fps().round(),
            frame_time_ms: (self.monitor.frame_time_ms() * 100.0).round() / 100.0,
            quality_level: self.monitor.level(),
            effect_count: self.effects.len(),
            is_running: self.state == EngineState::Running,
        }
    }

    pub fn field_stats(&self) -> FieldStats {
        self.field.stats()
    }

    pub fn motion_stats(&self) -> MotionStats {
        self.motion.stats()
    }
}

fn paint<S: DrawSurface>(
    surface: &mut S,
    fade_alpha: f32,
    frame: &DrawList,
    effects: &[Box<dyn Effect>],
) -> Result<(), SurfaceError> {
    surface.fade(fade_alpha)?;
    for link in &frame.links {
        surface.draw_link(link)?;
    }
    for particle in &frame.particles {
        surface.draw_particle(particle)?;
    }
    for effect in effects {
        effect.draw(surface)?;
    }
    Ok(())
}
