// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_ordered() {
    assert!(BOOT_DELAY_MS > 0);
    assert!(RESET_DELAY_MS > 0);
    // Reset re-initialises faster than a cold boot.
    assert!(RESET_DELAY_MS < BOOT_DELAY_MS);
    // The help hint outlives several stats refreshes.
    assert!(HELP_FADE_MS > STATS_REFRESH_MS * 5);
}

#[test]
fn canvas_overlay_never_takes_pointer_events() {
    assert!(CANVAS_STYLE.contains("pointer-events:none"));
    assert!(CANVAS_STYLE.contains("position:fixed"));
    assert!(CANVAS_Z_INDEX.parse::<i32>().is_ok());
    assert!(!CANVAS_CLASS.is_empty());
}

#[test]
fn overlay_ids_are_distinct() {
    assert_ne!(STATS_PANEL_ID, HELP_TEXT_ID);
}

#[test]
fn reduced_motion_query_targets_reduce() {
    assert_eq!(REDUCED_MOTION_QUERY, "(prefers-reduced-motion: reduce)");
}

#[test]
fn mobile_markers_match_common_agents() {
    let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    let desktop = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36";
    assert!(MOBILE_UA_MARKERS.iter().any(|m| iphone.contains(m)));
    assert!(!MOBILE_UA_MARKERS.iter().any(|m| desktop.contains(m)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ripple_hue_is_a_degree() {
    assert!((0.0..360.0).contains(&RIPPLE_HUE));
}
