//! Geometry and colour handed to the external renderer.
//!
//! Everything here is already computed; a backend only has to paint it.

use glam::Vec2;
use std::fmt;

/// HSL colour with alpha. Hue in degrees, saturation/lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// CSS colour string, e.g. `hsla(200, 100%, 50%, 0.5)`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
            self.hue,
            self.saturation,
            self.lightness,
            self.alpha.clamp(0.0, 1.0)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Hsla,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailDraw {
    pub points: Vec<Vec2>,
    pub color: Hsla,
    pub width: f32,
}

/// A particle as a radial glow plus a solid core.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleDraw {
    pub position: Vec2,
    pub glow_radius: f32,
    pub glow_stops: [GradientStop; 3],
    pub core_radius: f32,
    pub core_color: Hsla,
    pub trail: Option<TrailDraw>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkDraw {
    pub a: Vec2,
    pub b: Vec2,
    pub color: Hsla,
    pub width: f32,
}

/// Expanding ring left behind by a tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleDraw {
    pub center: Vec2,
    pub radius: f32,
    pub color: Hsla,
    pub width: f32,
}

/// One frame of draw calls in paint order: links under particles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub links: Vec<LinkDraw>,
    pub particles: Vec<ParticleDraw>,
}

impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.particles.is_empty()
    }
}
