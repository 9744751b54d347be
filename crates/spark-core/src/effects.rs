use crate::constants::*;
use crate::draw::{Hsla, RippleDraw};
use crate::error::SurfaceError;
use crate::surface::DrawSurface;
use glam::Vec2;

pub trait Effect {
    /// Advance by `delta_ms`; `false` once finished.
    fn update(&mut self, delta_ms: f32) -> bool;
    fn draw(&self, surface: &mut dyn DrawSurface) -> Result<(), SurfaceError>;
}

/// Expanding, fading ring at a tap position.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub hue: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    max_radius: f32,
}

impl Ripple {
    pub fn new(center: Vec2, hue: f32) -> Self {
        Self {
            center,
            hue,
            elapsed_ms: 0.0,
            duration_ms: RIPPLE_DURATION_MS,
            max_radius: RIPPLE_MAX_RADIUS,
        }
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn geometry(&self) -> RippleDraw {
        let t = self.progress();
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        RippleDraw {
            center: self.center,
            radius: self.max_radius * eased,
            color: Hsla::new(self.hue, DEFAULT_SATURATION, 70.0, (1.0 - t) * RIPPLE_ALPHA),
            width: 0.5 + 2.0 * (1.0 - t),
        }
    }
}

impl Effect for Ripple {
    fn update(&mut self, delta_ms: f32) -> bool {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        self.elapsed_ms < self.duration_ms
    }

    fn draw(&self, surface: &mut dyn DrawSurface) -> Result<(), SurfaceError> {
        surface.draw_ripple(&self.geometry())
    }
}
