//! Typed settings and the loose option bag the host passes in.
//!
//! Hosts hand over `key -> value` pairs (a JS object on the web). Recognised
//! keys are validated and merged; anything else is ignored.

use crate::constants::*;
use crate::error::OptionError;
use crate::quality::QualityLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceMode {
    Auto,
    Fixed(QualityLevel),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSettings {
    /// Hard ceiling; the active quality tier may hold the field below it.
    pub max_particles: usize,
    /// Base particles per tick, scaled up by movement intensity.
    pub spawn_rate: f32,
    pub spawn_radius: f32,
    pub connection_opacity: f32,
    pub show_connections: bool,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            max_particles: QualityLevel::High.max_particles(),
            spawn_rate: DEFAULT_SPAWN_RATE,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            connection_opacity: DEFAULT_CONNECTION_OPACITY,
            show_connections: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    /// Upper bound on the transient effect cap; the controller never grows
    /// the cap past it.
    pub max_effects: usize,
    /// Fraction of the previous frame kept by the per-frame fade fill.
    pub fade_rate: f32,
    pub performance_mode: PerformanceMode,
    /// Honour the host's reduced-motion preference.
    pub enable_accessibility: bool,
    pub field: FieldSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_effects: DEFAULT_MAX_EFFECTS,
            fade_rate: DEFAULT_FADE_RATE,
            performance_mode: PerformanceMode::Auto,
            enable_accessibility: true,
            field: FieldSettings::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Number(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectOptions {
    entries: Vec<(String, OptionValue)>,
}

impl EffectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) {
        self.entries.push((key.to_string(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EngineSettings {
    pub fn from_options(options: &EffectOptions) -> Self {
        let mut settings = Self::default();
        settings.merge(options);
        settings
    }

    /// Merge every recognised option; invalid values are logged and skipped.
    /// Returns how many options were applied.
    pub fn merge(&mut self, options: &EffectOptions) -> usize {
        let mut applied = 0;
        for (key, value) in options.iter() {
            match self.apply_option(key, value) {
                Ok(true) => applied += 1,
                Ok(false) => log::debug!("[config] ignoring unknown option `{}`", key),
                Err(e) => log::warn!("[config] {}", e),
            }
        }
        applied
    }

    /// `Ok(false)` means the key is not one we recognise.
    pub fn apply_option(&mut self, key: &str, value: &OptionValue) -> Result<bool, OptionError> {
        match key {
            "maxParticles" => self.field.max_particles = count("maxParticles", value)?,
            "spawnRate" => self.field.spawn_rate = non_negative("spawnRate", value)?,
            "spawnRadius" => self.field.spawn_radius = non_negative("spawnRadius", value)?,
            "connectionOpacity" => {
                self.field.connection_opacity = unit("connectionOpacity", value)?
            }
            "showConnections" => self.field.show_connections = flag("showConnections", value)?,
            "maxEffects" => self.max_effects = count("maxEffects", value)?,
            "fadeRate" => self.fade_rate = unit("fadeRate", value)?,
            "enableAccessibility" => {
                self.enable_accessibility = flag("enableAccessibility", value)?
            }
            "performanceMode" => self.performance_mode = mode(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn number(key: &'static str, value: &OptionValue) -> Result<f64, OptionError> {
    match value {
        OptionValue::Number(v) if v.is_finite() => Ok(*v),
        OptionValue::Number(v) => Err(OptionError::OutOfRange { key, value: *v }),
        _ => Err(OptionError::WrongType {
            key,
            expected: "a number",
        }),
    }
}

fn non_negative(key: &'static str, value: &OptionValue) -> Result<f32, OptionError> {
    let v = number(key, value)?;
    if v < 0.0 {
        return Err(OptionError::OutOfRange { key, value: v });
    }
    Ok(v as f32)
}

fn unit(key: &'static str, value: &OptionValue) -> Result<f32, OptionError> {
    let v = number(key, value)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(OptionError::OutOfRange { key, value: v });
    }
    Ok(v as f32)
}

fn count(key: &'static str, value: &OptionValue) -> Result<usize, OptionError> {
    let v = number(key, value)?;
    if v < 0.0 {
        return Err(OptionError::OutOfRange { key, value: v });
    }
    Ok(v.floor() as usize)
}

fn flag(key: &'static str, value: &OptionValue) -> Result<bool, OptionError> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        _ => Err(OptionError::WrongType {
            key,
            expected: "a boolean",
        }),
    }
}

fn mode(value: &OptionValue) -> Result<PerformanceMode, OptionError> {
    match value {
        OptionValue::Text(name) if name.eq_ignore_ascii_case("auto") => Ok(PerformanceMode::Auto),
        OptionValue::Text(name) => QualityLevel::parse(name)
            .map(PerformanceMode::Fixed)
            .ok_or_else(|| OptionError::UnknownMode(name.clone())),
        _ => Err(OptionError::WrongType {
            key: "performanceMode",
            expected: "a string",
        }),
    }
}
