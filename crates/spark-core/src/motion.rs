//! Pointer motion estimation.
//!
//! Turns irregularly timed raw pointer positions into a smoothed velocity,
//! acceleration and a normalised 0–1 movement intensity. All operations are
//! total: anomalous input (too-soon samples, non-monotonic or non-finite
//! timestamps, jitter) is dropped without touching state.

use crate::constants::*;
use glam::Vec2;
use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_4, TAU};

/// One accepted observation kept for trend queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub timestamp: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    pub direction: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSignal {
    pub position: Vec2,
    /// Smoothed velocity in units per second.
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub speed: f32,
    /// Angle of `velocity` in radians, `-PI..=PI`.
    pub direction: f32,
    pub is_touch: bool,
    pub timestamp: f64,
    pub movement_intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionTrend {
    Accelerating,
    Decelerating,
    Steady,
}

impl MotionTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionTrend::Accelerating => "accelerating",
            MotionTrend::Decelerating => "decelerating",
            MotionTrend::Steady => "steady",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionStats {
    pub position: Vec2,
    pub speed: f32,
    pub direction_degrees: f32,
    pub intensity_percent: f32,
    pub trend: MotionTrend,
    pub is_touch: bool,
    pub history_len: usize,
    pub is_tracking: bool,
}

#[derive(Clone, Debug)]
pub struct MotionEstimator {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    speed: f32,
    direction: f32,
    history: VecDeque<MotionSample>,
    last_update_ms: f64,
    is_touch: bool,
    touch_id: Option<i32>,
    tracking: bool,
}

impl Default for MotionEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionEstimator {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            speed: 0.0,
            direction: 0.0,
            history: VecDeque::with_capacity(MOTION_HISTORY_LEN + 1),
            last_update_ms: 0.0,
            is_touch: false,
            touch_id: None,
            tracking: false,
        }
    }

    /// Feed one raw position. Returns the updated signal, or `None` when the
    /// sample was rejected (too soon after the last accepted one, or moved
    /// less than the jitter threshold).
    pub fn observe(&mut self, x: f32, y: f32, now_ms: f64) -> Option<MotionSignal> {
        let elapsed = now_ms - self.last_update_ms;
        // NaN fails this comparison too
        if !(elapsed >= MIN_SAMPLE_INTERVAL_MS) {
            return None;
        }
        let target = Vec2::new(x, y);
        if !target.is_finite() {
            return None;
        }
        let delta = target - self.position;
        if delta.length() < MIN_MOVEMENT_DISTANCE {
            return None;
        }

        let instantaneous = delta * (1000.0 / elapsed) as f32;
        self.velocity =
            self.velocity * VELOCITY_SMOOTHING + instantaneous * (1.0 - VELOCITY_SMOOTHING);
        self.speed = self.velocity.length();
        self.direction = self.velocity.y.atan2(self.velocity.x);
        self.position = target;

        self.push_sample(now_ms);
        self.acceleration = self.latest_acceleration();
        self.last_update_ms = now_ms;

        Some(self.signal(now_ms))
    }

    /// Pointer left the tracked area: decay towards rest instead of cutting
    /// the signal. Emits a signal only while the decayed speed stays visible.
    pub fn signal_movement_stop(&mut self, now_ms: f64) -> Option<MotionSignal> {
        self.velocity *= STOP_FADE_FACTOR;
        self.speed *= STOP_FADE_FACTOR;
        self.acceleration = Vec2::ZERO;
        (self.speed > STOP_SPEED_FLOOR).then(|| self.signal(now_ms))
    }

    // ---------------- Tracking and input routing ----------------

    pub fn start_tracking(&mut self, now_ms: f64) {
        if self.tracking {
            return;
        }
        self.tracking = true;
        self.last_update_ms = now_ms;
        log::debug!("[motion] tracking started");
    }

    pub fn stop_tracking(&mut self) {
        if self.tracking {
            self.tracking = false;
            log::debug!("[motion] tracking stopped");
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn mouse_moved(&mut self, x: f32, y: f32, now_ms: f64) -> Option<MotionSignal> {
        if !self.tracking {
            return None;
        }
        self.is_touch = false;
        self.observe(x, y, now_ms)
    }

    pub fn mouse_left(&mut self, now_ms: f64) -> Option<MotionSignal> {
        if !self.tracking {
            return None;
        }
        self.signal_movement_stop(now_ms)
    }

    /// Adopts the first touch of the event unless the touch already being
    /// followed is still down. A stale id whose end was never reported is
    /// replaced.
    pub fn touch_start(&mut self, touches: &[TouchPoint], now_ms: f64) -> Option<MotionSignal> {
        if !self.tracking {
            return None;
        }
        let first = touches.first()?;
        if let Some(id) = self.touch_id {
            if id != first.id && touches.iter().any(|t| t.id == id) {
                return None;
            }
        }
        self.is_touch = true;
        self.touch_id = Some(first.id);
        self.observe(first.x, first.y, now_ms)
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint], now_ms: f64) -> Option<MotionSignal> {
        if !self.tracking || !self.is_touch {
            return None;
        }
        let id = self.touch_id?;
        let touch = touches.iter().find(|t| t.id == id)?;
        self.observe(touch.x, touch.y, now_ms)
    }

    /// `remaining` are the touches still on the surface after the event.
    pub fn touch_end(&mut self, remaining: &[TouchPoint], now_ms: f64) -> Option<MotionSignal> {
        if !self.tracking {
            return None;
        }
        if let Some(id) = self.touch_id {
            if remaining.iter().any(|t| t.id == id) {
                return None;
            }
        }
        self.is_touch = false;
        self.touch_id = None;
        self.signal_movement_stop(now_ms)
    }

    // ---------------- Queries ----------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn is_touch(&self) -> bool {
        self.is_touch
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &MotionSample> {
        self.history.iter()
    }

    /// Sub-linear map of speed to `0..=1` so moderate motion already registers.
    pub fn movement_intensity(&self) -> f32 {
        let normalized = (self.speed / MAX_POINTER_SPEED).min(1.0);
        normalized.powf(INTENSITY_EXPONENT).clamp(0.0, 1.0)
    }

    pub fn trend(&self) -> MotionTrend {
        let len = self.history.len();
        if len < TREND_WINDOW {
            return MotionTrend::Steady;
        }
        let oldest = self.history[len - TREND_WINDOW].speed;
        let newest = self.history[len - 1].speed;
        let delta = newest - oldest;
        if delta > TREND_SPEED_DELTA {
            MotionTrend::Accelerating
        } else if delta < -TREND_SPEED_DELTA {
            MotionTrend::Decelerating
        } else {
            MotionTrend::Steady
        }
    }

    /// Circular mean of the most recent directions.
    pub fn average_direction(&self) -> f32 {
        if self.history.len() < TREND_WINDOW {
            return self.direction;
        }
        let (sin_sum, cos_sum) = self
            .history
            .iter()
            .rev()
            .take(DIRECTION_WINDOW)
            .fold((0.0_f32, 0.0_f32), |(s, c), sample| {
                (s + sample.direction.sin(), c + sample.direction.cos())
            });
        sin_sum.atan2(cos_sum)
    }

    /// True when the current heading is within `tolerance` radians of
    /// `target`, measured along the shorter arc.
    pub fn is_moving_in_direction(&self, target: f32, tolerance: f32) -> bool {
        let diff = (self.direction - target).abs().rem_euclid(TAU);
        diff.min(TAU - diff) <= tolerance
    }

    pub fn is_moving_towards(&self, target: f32) -> bool {
        self.is_moving_in_direction(target, FRAC_PI_4)
    }

    pub fn stats(&self) -> MotionStats {
        MotionStats {
            position: self.position,
            speed: self.speed.round(),
            direction_degrees: self.direction.to_degrees().round(),
            intensity_percent: (self.movement_intensity() * 100.0).round(),
            trend: self.trend(),
            is_touch: self.is_touch,
            history_len: self.history.len(),
            is_tracking: self.tracking,
        }
    }

    /// Forget all motion; tracking state and the sampling clock survive.
    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        self.speed = 0.0;
        self.direction = 0.0;
        self.history.clear();
        self.is_touch = false;
        self.touch_id = None;
        log::debug!("[motion] reset");
    }

    fn signal(&self, now_ms: f64) -> MotionSignal {
        MotionSignal {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            speed: self.speed,
            direction: self.direction,
            is_touch: self.is_touch,
            timestamp: now_ms,
            movement_intensity: self.movement_intensity(),
        }
    }

    fn push_sample(&mut self, timestamp: f64) {
        self.history.push_back(MotionSample {
            timestamp,
            position: self.position,
            velocity: self.velocity,
            speed: self.speed,
            direction: self.direction,
        });
        while self.history.len() > MOTION_HISTORY_LEN {
            self.history.pop_front();
        }
    }

    fn latest_acceleration(&self) -> Vec2 {
        let len = self.history.len();
        if len < 2 {
            return Vec2::ZERO;
        }
        let current = &self.history[len - 1];
        let previous = &self.history[len - 2];
        let dt_sec = ((current.timestamp - previous.timestamp) / 1000.0) as f32;
        if dt_sec > 0.0 {
            (current.velocity - previous.velocity) / dt_sec
        } else {
            Vec2::ZERO
        }
    }
}
