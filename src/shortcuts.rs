/// Demo keyboard shortcuts. Kept free of DOM types so it can be tested on
/// the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleStats,
    ToggleEffect,
    Reset,
}

impl Shortcut {
    pub fn label(self) -> &'static str {
        match self {
            Shortcut::ToggleStats => "toggle stats",
            Shortcut::ToggleEffect => "toggle effect",
            Shortcut::Reset => "reset",
        }
    }
}

/// Every shortcut needs Ctrl (or Cmd on macOS); bare keys are left to the page.
#[inline]
pub fn shortcut_for(key: &str, ctrl_or_meta: bool) -> Option<Shortcut> {
    if !ctrl_or_meta {
        return None;
    }
    match key {
        "s" | "S" => Some(Shortcut::ToggleStats),
        "e" | "E" => Some(Shortcut::ToggleEffect),
        "r" | "R" => Some(Shortcut::Reset),
        _ => None,
    }
}

pub fn help_text() -> String {
    [
        ("Ctrl/Cmd+S", Shortcut::ToggleStats),
        ("Ctrl/Cmd+E", Shortcut::ToggleEffect),
        ("Ctrl/Cmd+R", Shortcut::Reset),
    ]
    .iter()
    .map(|(keys, s)| format!("{keys}: {}", s.label()))
    .collect::<Vec<_>>()
    .join(" · ")
}
