//! Frame-rate monitoring and the discrete quality controller.
//!
//! Degrading and upgrading use different thresholds (30 vs 50 fps) so a
//! frame rate hovering around one value cannot make the level oscillate.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

impl QualityLevel {
    /// Particle ceiling for this tier; bounds the O(n²) neighbour scans.
    pub fn max_particles(self) -> usize {
        match self {
            QualityLevel::Low => 20,
            QualityLevel::Medium => 35,
            QualityLevel::High => 50,
        }
    }

    pub fn max_effects(self) -> usize {
        match self {
            QualityLevel::Low => 8,
            QualityLevel::Medium => 12,
            QualityLevel::High => 15,
        }
    }

    pub fn lower(self) -> Self {
        match self {
            QualityLevel::High => QualityLevel::Medium,
            _ => QualityLevel::Low,
        }
    }

    pub fn raise(self) -> Self {
        match self {
            QualityLevel::Low => QualityLevel::Medium,
            _ => QualityLevel::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityLevel::Low => "low",
            QualityLevel::Medium => "medium",
            QualityLevel::High => "high",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "low" => Some(QualityLevel::Low),
            "medium" => Some(QualityLevel::Medium),
            "high" => Some(QualityLevel::High),
            _ => None,
        }
    }
}

/// What the host knows about the device, probed once at start-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub is_mobile: bool,
    pub pixel_ratio: f64,
    pub width: f64,
    pub height: f64,
}

impl DeviceProfile {
    /// Phones and small screens start low, high-DPI full-HD screens high.
    pub fn initial_quality(&self) -> QualityLevel {
        let area = self.width * self.height;
        if self.is_mobile || area < SMALL_SCREEN_AREA {
            QualityLevel::Low
        } else if area < FULL_HD_AREA || self.pixel_ratio <= 1.0 {
            QualityLevel::Medium
        } else {
            QualityLevel::High
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            is_mobile: false,
            pixel_ratio: 1.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Result of a periodic quality evaluation that changed something.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityChange {
    Degraded(QualityLevel),
    Upgraded(QualityLevel),
}

/// Rolling frame metrics plus the closed-loop level/effect-cap controller.
#[derive(Clone, Debug)]
pub struct PerformanceMonitor {
    fps: f32,
    frame_time_ms: f32,
    frame_count: u64,
    level: QualityLevel,
    effect_cap: usize,
    effect_ceiling: usize,
}

impl PerformanceMonitor {
    pub fn new(level: QualityLevel, effect_cap: usize, effect_ceiling: usize) -> Self {
        Self {
            fps: 1000.0 / NOMINAL_FRAME_MS,
            frame_time_ms: NOMINAL_FRAME_MS,
            frame_count: 0,
            level,
            effect_cap: effect_cap.min(effect_ceiling),
            effect_ceiling,
        }
    }

    /// Record one frame. Non-positive or non-finite deltas carry no timing
    /// information and are ignored.
    pub fn record_frame(&mut self, delta_ms: f64) -> Option<QualityChange> {
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            return None;
        }
        self.frame_time_ms = delta_ms as f32;
        self.fps = (1000.0 / delta_ms) as f32;
        self.frame_count += 1;
        if self.frame_count % QUALITY_EVAL_INTERVAL == 0 {
            self.evaluate()
        } else {
            None
        }
    }

    fn evaluate(&mut self) -> Option<QualityChange> {
        if self.fps < DEGRADE_FPS && self.level != QualityLevel::Low {
            self.level = self.level.lower();
            self.effect_cap = self
                .effect_cap
                .saturating_sub(EFFECT_CAP_SHRINK)
                .max(EFFECT_CAP_FLOOR);
            log::info!(
                "[quality] fps={:.1} -> {} (effects {})",
                self.fps,
                self.level.as_str(),
                self.effect_cap
            );
            Some(QualityChange::Degraded(self.level))
        } else if self.fps > UPGRADE_FPS && self.level == QualityLevel::Low {
            self.level = self.level.raise();
            self.effect_cap = (self.effect_cap + EFFECT_CAP_GROW).min(self.effect_ceiling);
            log::info!(
                "[quality] fps={:.1} -> {} (effects {})",
                self.fps,
                self.level.as_str(),
                self.effect_cap
            );
            Some(QualityChange::Upgraded(self.level))
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn level(&self) -> QualityLevel {
        self.level
    }

    pub fn effect_cap(&self) -> usize {
        self.effect_cap
    }

    pub fn set_effect_ceiling(&mut self, ceiling: usize) {
        self.effect_ceiling = ceiling;
        self.effect_cap = self.effect_cap.min(ceiling);
    }
}
