use crate::constants::{HELP_TEXT_ID, STATS_PANEL_ID};
use spark_core::{EngineStats, FieldStats, MotionStats};
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_STYLE: &str = "position:fixed;top:12px;right:12px;z-index:10;\
    color:#cfe7ff;font:12px/1.5 ui-monospace,monospace;white-space:pre;\
    background:rgba(10,14,24,0.8);padding:8px 12px;border-radius:6px;\
    border:1px solid rgba(80,110,150,0.35);pointer-events:none;";

const HELP_STYLE: &str = "position:fixed;bottom:12px;left:50%;transform:translateX(-50%);\
    z-index:10;color:#cfe7ff;font:13px system-ui;background:rgba(10,14,24,0.8);\
    padding:8px 12px;border-radius:6px;pointer-events:none;transition:opacity 1s;";

fn create_div(document: &web::Document, id: &str, style: &str) -> Option<web::HtmlElement> {
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    el.set_id(id);
    el.style().set_css_text(style);
    document.body()?.append_child(&el).ok()?;
    Some(el)
}

/// Live engine statistics, hidden until toggled.
pub struct StatsPanel {
    el: web::HtmlElement,
    visible: bool,
}

impl StatsPanel {
    pub fn new(document: &web::Document) -> Option<Self> {
        let el = create_div(document, STATS_PANEL_ID, PANEL_STYLE)?;
        let panel = Self { el, visible: false };
        panel.apply_visibility();
        Some(panel)
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.apply_visibility();
        self.visible
    }

    fn apply_visibility(&self) {
        let display = if self.visible { "block" } else { "none" };
        _ = self.el.style().set_property("display", display);
    }

    pub fn update(&self, engine: &EngineStats, field: &FieldStats, motion: &MotionStats) {
        if !self.visible {
            return;
        }
        let text = format!(
            "FPS: {}\nFrame: {:.2}ms\nQuality: {}\nParticles: {}/{}\nEnergy: {:.0}%\nEffects: {}\nSpeed: {}\nIntensity: {}%\nTrend: {}\n{}",
            engine.fps,
            engine.frame_time_ms,
            engine.quality_level.as_str(),
            field.particle_count,
            field.max_particles,
            field.average_energy * 100.0,
            engine.effect_count,
            motion.speed,
            motion.intensity_percent,
            motion.trend.as_str(),
            if engine.is_running { "running" } else { "stopped" }
        );
        self.el.set_text_content(Some(&text));
    }
}

impl Drop for StatsPanel {
    fn drop(&mut self) {
        self.el.remove();
    }
}

/// Shortcut hint shown at start-up; fades out on its own.
pub struct HelpText {
    el: web::HtmlElement,
}

impl HelpText {
    pub fn show(document: &web::Document, text: &str) -> Option<Self> {
        let el = create_div(document, HELP_TEXT_ID, HELP_STYLE)?;
        el.set_text_content(Some(text));
        Some(Self { el })
    }

    pub fn fade_out(&self) {
        _ = self.el.style().set_property("opacity", "0");
    }
}

impl Drop for HelpText {
    fn drop(&mut self) {
        self.el.remove();
    }
}
