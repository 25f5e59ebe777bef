//! Styles resolved from the active display style.

use ratatui::style::{Color, Style};
use tailwatch_app::config::StyleSettings;
use tailwatch_app::LineKind;
use tailwatch_core::prelude::*;
use tailwatch_core::TextTone;

use super::palette;

/// Colours of one display style, parsed once per style switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelColors {
    pub bg: Color,
    pub normal: Color,
    pub stale: Color,
    pub high_freq: Color,
    pub status_header: Color,
    pub task_header: Color,
}

impl PanelColors {
    /// Invalid entries fall back with a warning
    pub fn from_style(style: &StyleSettings) -> Self {
        Self {
            bg: resolve("bg_color", &style.bg_color, palette::FALLBACK_BG),
            normal: resolve("normal_color", &style.normal_color, palette::FALLBACK_TEXT),
            stale: resolve("stale_color", &style.stale_color, palette::FALLBACK_TEXT),
            high_freq: resolve(
                "high_freq_color",
                &style.high_freq_color,
                palette::FALLBACK_TEXT,
            ),
            status_header: resolve(
                "status_header_color",
                &style.status_header_color,
                palette::FALLBACK_TEXT,
            ),
            task_header: resolve(
                "task_header_color",
                &style.task_header_color,
                palette::FALLBACK_TEXT,
            ),
        }
    }

    pub fn tone(&self, tone: TextTone) -> Color {
        match tone {
            TextTone::Normal => self.normal,
            TextTone::Stale => self.stale,
            TextTone::HighFrequency => self.high_freq,
        }
    }

    /// Header lines keep their own colours; everything else follows the tone
    pub fn line(&self, kind: LineKind, tone: TextTone) -> Style {
        let fg = match kind {
            LineKind::ConfigHeader => self.status_header,
            LineKind::TaskHeader => self.task_header,
            LineKind::Warning | LineKind::Log | LineKind::Notice => self.tone(tone),
        };
        Style::default().fg(fg)
    }

    /// Panel fill; a transparent panel leaves the terminal background
    pub fn background(&self, transparent: bool) -> Style {
        if transparent {
            Style::default()
        } else {
            Style::default().bg(self.bg)
        }
    }
}

fn resolve(key: &str, value: &str, fallback: Color) -> Color {
    palette::parse_hex(value).unwrap_or_else(|| {
        warn!("Invalid colour {:?} for {}, using fallback", value, key);
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_style_colours() {
        let colors = PanelColors::from_style(&StyleSettings::main());
        assert_eq!(colors.normal, Color::Rgb(0, 255, 0));
        assert_eq!(colors.stale, Color::Rgb(255, 0, 0));
        assert_eq!(colors.high_freq, Color::Rgb(255, 165, 0));
    }

    #[test]
    fn test_invalid_colour_falls_back() {
        let mut style = StyleSettings::main();
        style.bg_color = "transparent".to_string();
        style.normal_color = "#XYZ".to_string();

        let colors = PanelColors::from_style(&style);
        assert_eq!(colors.bg, palette::FALLBACK_BG);
        assert_eq!(colors.normal, palette::FALLBACK_TEXT);
    }

    #[test]
    fn test_line_styles_follow_kind_and_tone() {
        let colors = PanelColors::from_style(&StyleSettings::second());

        assert_eq!(
            colors.line(LineKind::ConfigHeader, TextTone::Stale).fg,
            Some(Color::Rgb(0, 255, 0))
        );
        assert_eq!(
            colors.line(LineKind::TaskHeader, TextTone::Normal).fg,
            Some(Color::Rgb(0, 255, 255))
        );
        assert_eq!(
            colors.line(LineKind::Log, TextTone::HighFrequency).fg,
            Some(colors.high_freq)
        );
    }

    #[test]
    fn test_transparent_background_has_no_fill() {
        let colors = PanelColors::from_style(&StyleSettings::main());
        assert_eq!(colors.background(true).bg, None);
        assert_eq!(colors.background(false).bg, Some(Color::Rgb(0, 0, 0)));
    }
}
