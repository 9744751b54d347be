// Host-side tests for keyboard shortcut mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod shortcuts {
    include!("../src/shortcuts.rs");
}

use shortcuts::*;

#[test]
fn ctrl_or_cmd_letters_map_to_actions() {
    assert_eq!(shortcut_for("s", true), Some(Shortcut::ToggleStats));
    assert_eq!(shortcut_for("E", true), Some(Shortcut::ToggleEffect));
    assert_eq!(shortcut_for("r", true), Some(Shortcut::Reset));
}

#[test]
fn bare_keys_are_left_alone() {
    for key in ["s", "e", "r", "S"] {
        assert_eq!(shortcut_for(key, false), None, "key {key}");
    }
}

#[test]
fn unrelated_keys_do_nothing() {
    for key in ["a", "x", "Enter", " ", "Escape", "ArrowUp", ""] {
        assert_eq!(shortcut_for(key, true), None, "key {key:?}");
    }
}

#[test]
fn help_text_lists_every_shortcut() {
    let text = help_text();
    for s in [Shortcut::ToggleStats, Shortcut::ToggleEffect, Shortcut::Reset] {
        assert!(text.contains(s.label()), "missing {}", s.label());
    }
    assert!(text.contains("Ctrl/Cmd+R"));
}
