//! Fallback colours and hex parsing.

use ratatui::style::Color;

// --- Fallbacks for unparseable settings ---
pub const FALLBACK_BG: Color = Color::Black;
pub const FALLBACK_TEXT: Color = Color::White;

// --- Chrome ---
pub const BORDER: Color = Color::DarkGray;
pub const TITLE: Color = Color::Gray;

/// Parse `#RRGGBB` or `#RGB` (the `#` is optional)
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
            Some(Color::Rgb(digit(0).ok()?, digit(1).ok()?, digit(2).ok()?))
        }
        _ => None,
    }
}
