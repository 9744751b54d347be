/// Front-end timing, DOM and styling constants.
///
/// Simulation tuning lives in `spark_core::constants`; everything here is
/// about how the browser host is wired.
// Boot and reset
pub const BOOT_DELAY_MS: i32 = 500; // let the page settle before the first frame
pub const RESET_DELAY_MS: i32 = 100;

// Overlay
pub const STATS_REFRESH_MS: i32 = 1000;
pub const HELP_FADE_MS: i32 = 10_000;
pub const STATS_PANEL_ID: &str = "spark-stats";
pub const HELP_TEXT_ID: &str = "spark-help";

// Canvas
pub const CANVAS_CLASS: &str = "spark-canvas";
pub const CANVAS_Z_INDEX: &str = "2"; // above page background, below content
pub const CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100%;height:100%;pointer-events:none;";

// Environment probes
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const MOBILE_UA_MARKERS: &[&str] = &[
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];
pub const OPTIONS_GLOBAL: &str = "sparkOptions"; // window.sparkOptions = {...}

// Tap ripples
pub const RIPPLE_HUE: f32 = 200.0;
