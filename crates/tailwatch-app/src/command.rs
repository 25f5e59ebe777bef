//! Named commands delivered by key chords, stdin or signals

use serde::Serialize;

/// Discrete command the front ends can deliver at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyCommand {
    /// Close the viewer
    Close,
    /// Toggle the panel background fill
    ToggleTransparent,
    /// Switch between the main and second display style
    ToggleSecondStyle,
}

impl HotkeyCommand {
    pub const ALL: [HotkeyCommand; 3] = [
        HotkeyCommand::Close,
        HotkeyCommand::ToggleTransparent,
        HotkeyCommand::ToggleSecondStyle,
    ];

    /// Wire name, as accepted on stdin
    pub fn name(&self) -> &'static str {
        match self {
            HotkeyCommand::Close => "close",
            HotkeyCommand::ToggleTransparent => "toggle_transparent",
            HotkeyCommand::ToggleSecondStyle => "toggle_second_style",
        }
    }

    /// Parse a command name, case-insensitive, with a few short aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "close" | "quit" | "q" => Some(HotkeyCommand::Close),
            "toggle_transparent" | "transparent" | "t" => Some(HotkeyCommand::ToggleTransparent),
            "toggle_second_style" | "second_style" | "style" | "s" => {
                Some(HotkeyCommand::ToggleSecondStyle)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for HotkeyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
