//! Seams to the host: the drawing backend and event registrations.

use crate::draw::{LinkDraw, ParticleDraw, RippleDraw};
use crate::error::SurfaceError;

/// A backend that paints already-computed geometry.
pub trait DrawSurface {
    /// Cover the whole surface with black at `alpha`; 1.0 clears it.
    fn fade(&mut self, alpha: f32) -> Result<(), SurfaceError>;
    fn draw_link(&mut self, link: &LinkDraw) -> Result<(), SurfaceError>;
    fn draw_particle(&mut self, particle: &ParticleDraw) -> Result<(), SurfaceError>;
    fn draw_ripple(&mut self, _ripple: &RippleDraw) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Handle to an external registration (event listener, timer, ...).
///
/// The release action runs exactly once: on [`Subscription::release`] or
/// when the handle is dropped, whichever happens first.
pub struct Subscription {
    label: &'static str,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(label: &'static str, release: impl FnOnce() + 'static) -> Self {
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            log::debug!("[subscription] releasing {}", self.label);
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.is_active())
            .finish()
    }
}
