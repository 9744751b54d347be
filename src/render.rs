use crate::constants::{CANVAS_CLASS, CANVAS_STYLE, CANVAS_Z_INDEX};
use crate::dom;
use spark_core::{DrawSurface, LinkDraw, ParticleDraw, RippleDraw, SurfaceError, TrailDraw};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn backend(e: JsValue) -> SurfaceError {
    SurfaceError::Backend(format!("{:?}", e))
}

fn unavailable(what: &str) -> SurfaceError {
    SurfaceError::Unavailable(what.to_string())
}

/// Full-viewport 2D canvas overlay. The element is appended on creation and
/// removed again when the painter is dropped.
pub struct CanvasPainter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    // CSS pixels; the backing store is this times the pixel ratio
    width: f64,
    height: f64,
}

impl CanvasPainter {
    pub fn attach(document: &web::Document) -> Result<Self, SurfaceError> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(backend)?
            .dyn_into()
            .map_err(|_| unavailable("canvas element"))?;
        canvas.set_class_name(CANVAS_CLASS);
        _ = canvas.set_attribute("aria-hidden", "true");
        let style = canvas.style();
        style.set_css_text(CANVAS_STYLE);
        _ = style.set_property("z-index", CANVAS_Z_INDEX);

        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(backend)?
            .ok_or_else(|| unavailable("2d context"))?
            .dyn_into()
            .map_err(|_| unavailable("2d context"))?;

        let body = document.body().ok_or_else(|| unavailable("document body"))?;
        body.append_child(&canvas).map_err(backend)?;

        let mut painter = Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        };
        painter.resize();
        log::info!(
            "[canvas] attached {}x{} css px",
            painter.width,
            painter.height
        );
        Ok(painter)
    }

    /// Match the viewport: backing store in device pixels, drawing in CSS pixels.
    pub fn resize(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        let (width, height) = dom::viewport_size(&window);
        let dpr = window.device_pixel_ratio().max(1.0);
        self.width = width;
        self.height = height;
        self.canvas.set_width((width * dpr).round() as u32);
        self.canvas.set_height((height * dpr).round() as u32);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{width}px"));
        _ = style.set_property("height", &format!("{height}px"));
        // Resizing resets the context state, so the scale is reapplied.
        if self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).is_ok() {
            _ = self.ctx.scale(dpr, dpr);
        }
    }

    fn stroke_trail(&self, trail: &TrailDraw) {
        let mut points = trail.points.iter();
        let Some(first) = points.next() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in points {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.set_stroke_style_str(&trail.color.css());
        ctx.set_line_width(trail.width as f64);
        ctx.stroke();
    }
}

impl DrawSurface for CanvasPainter {
    fn fade(&mut self, alpha: f32) -> Result<(), SurfaceError> {
        if alpha >= 1.0 {
            self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        } else {
            self.ctx
                .set_fill_style_str(&format!("rgba(0, 0, 0, {:.3})", alpha.max(0.0)));
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        }
        Ok(())
    }

    fn draw_link(&mut self, link: &LinkDraw) -> Result<(), SurfaceError> {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(link.a.x as f64, link.a.y as f64);
        ctx.line_to(link.b.x as f64, link.b.y as f64);
        ctx.set_stroke_style_str(&link.color.css());
        ctx.set_line_width(link.width as f64);
        ctx.stroke();
        Ok(())
    }

    fn draw_particle(&mut self, particle: &ParticleDraw) -> Result<(), SurfaceError> {
        if let Some(trail) = &particle.trail {
            self.stroke_trail(trail);
        }

        let (x, y) = (particle.position.x as f64, particle.position.y as f64);
        let ctx = &self.ctx;

        let glow = ctx
            .create_radial_gradient(x, y, 0.0, x, y, particle.glow_radius as f64)
            .map_err(backend)?;
        for stop in &particle.glow_stops {
            glow.add_color_stop(stop.offset, &stop.color.css())
                .map_err(backend)?;
        }
        ctx.set_fill_style_canvas_gradient(&glow);
        ctx.begin_path();
        ctx.arc(x, y, particle.glow_radius as f64, 0.0, TAU)
            .map_err(backend)?;
        ctx.fill();

        ctx.set_fill_style_str(&particle.core_color.css());
        ctx.begin_path();
        ctx.arc(x, y, particle.core_radius as f64, 0.0, TAU)
            .map_err(backend)?;
        ctx.fill();
        Ok(())
    }

    fn draw_ripple(&mut self, ripple: &RippleDraw) -> Result<(), SurfaceError> {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.arc(
            ripple.center.x as f64,
            ripple.center.y as f64,
            ripple.radius.max(0.0) as f64,
            0.0,
            TAU,
        )
        .map_err(backend)?;
        ctx.set_stroke_style_str(&ripple.color.css());
        ctx.set_line_width(ripple.width as f64);
        ctx.stroke();
        Ok(())
    }
}

impl Drop for CanvasPainter {
    fn drop(&mut self) {
        self.canvas.remove();
        log::debug!("[canvas] removed");
    }
}
