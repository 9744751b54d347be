/// Simulation tuning constants shared by the web and headless front-ends.
///
/// Forces are stylised heuristics tuned for visual plausibility; the numbers
/// below are the tuned values, not physical quantities.
// Motion estimation
pub const MIN_SAMPLE_INTERVAL_MS: f64 = 16.0; // ~60Hz sampling ceiling
pub const MIN_MOVEMENT_DISTANCE: f32 = 1.0; // sub-pixel jitter is noise
pub const VELOCITY_SMOOTHING: f32 = 0.8; // weight kept from the previous estimate
pub const MOTION_HISTORY_LEN: usize = 10;
pub const MAX_POINTER_SPEED: f32 = 2000.0; // units/sec mapped to full intensity
pub const INTENSITY_EXPONENT: f32 = 0.7;
pub const STOP_FADE_FACTOR: f32 = 0.9;
pub const STOP_SPEED_FLOOR: f32 = 1.0;
pub const TREND_SPEED_DELTA: f32 = 50.0;
pub const TREND_WINDOW: usize = 3;
pub const DIRECTION_WINDOW: usize = 5;

// Particle defaults
pub const DEFAULT_FRICTION: f32 = 0.98;
pub const DEFAULT_HUE: f32 = 200.0;
pub const DEFAULT_SATURATION: f32 = 100.0;
pub const DEFAULT_LIGHTNESS: f32 = 50.0;
pub const DEFAULT_MAX_AGE: u32 = 120; // ticks
pub const DEFAULT_ATTRACTION: f32 = 0.02;
pub const DEFAULT_REPULSION_RADIUS: f32 = 30.0;
pub const DEFAULT_CONNECTION_RADIUS: f32 = 80.0;
pub const DEFAULT_PULSE_SPEED: f32 = 0.05;
pub const TRAIL_LEN: usize = 5;
pub const TRAIL_FADE: f32 = 0.9;

// Particle interaction
pub const ACTIVE_INTENSITY: f32 = 0.1; // below this the pointer is treated as idle
pub const ATTRACTION_RANGE: f32 = 200.0;
pub const ATTRACTION_DISTANCE_SCALE: f32 = 0.01;
pub const ENERGY_GAIN: f32 = 0.02;
pub const REPULSION_SCALE: f32 = 0.001;
pub const CONNECTION_DEAD_ZONE: f32 = 10.0; // links shorter than this overlap visually
pub const BASELINE_FRAME_MS: f32 = 16.67; // 60fps integration baseline

// Spawning
pub const DEFAULT_SPAWN_RATE: f32 = 0.8; // particles per tick at zero intensity
pub const DEFAULT_SPAWN_RADIUS: f32 = 120.0;
pub const SPAWN_DECAY: f32 = 0.95;
pub const SPAWN_INTENSITY_GAIN: f32 = 2.0;
pub const SPAWN_JITTER: f32 = 4.0; // full width of the initial velocity jitter
pub const SPAWN_VELOCITY_INHERIT: f32 = 0.01;
pub const SPAWN_MIN_AGE: u32 = 60;
pub const SPAWN_MAX_AGE: u32 = 120; // exclusive

// Links
pub const DEFAULT_CONNECTION_OPACITY: f32 = 0.4;
pub const MIN_LINK_STRENGTH: f32 = 0.1;
pub const LINK_SATURATION: f32 = 80.0;
pub const LINK_WIDTH_SCALE: f32 = 2.0;

// Scheduling and quality control
pub const QUALITY_EVAL_INTERVAL: u64 = 60; // frames
pub const DEGRADE_FPS: f32 = 30.0;
pub const UPGRADE_FPS: f32 = 50.0;
pub const EFFECT_CAP_SHRINK: usize = 3;
pub const EFFECT_CAP_GROW: usize = 2;
pub const EFFECT_CAP_FLOOR: usize = 5;
pub const DEFAULT_MAX_EFFECTS: usize = 15;
pub const DEFAULT_FADE_RATE: f32 = 0.95;
pub const MAX_STEP_MS: f64 = 250.0; // integration clamp after stalls
pub const NOMINAL_FRAME_MS: f32 = 16.67;

// Tap ripples
pub const RIPPLE_DURATION_MS: f32 = 600.0;
pub const RIPPLE_MAX_RADIUS: f32 = 60.0;
pub const RIPPLE_ALPHA: f32 = 0.6;

// Device classification
pub const SMALL_SCREEN_AREA: f64 = 800.0 * 600.0;
pub const FULL_HD_AREA: f64 = 1920.0 * 1080.0;
