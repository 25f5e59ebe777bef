//! Panel rendering

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use tailwatch_app::config::StyleSettings;
use tailwatch_app::{AppState, DisplayFrame};
use tailwatch_reader::MonospaceMetrics;

use crate::theme::{palette, PanelColors};

/// Size of the bordered panel for a frame, anchored top-left.
///
/// The pixel width is converted to columns with the style's glyph advance.
pub fn panel_area(area: Rect, frame: &DisplayFrame, style: &StyleSettings) -> Rect {
    let advance = MonospaceMetrics::for_font(style.font()).advance_px();
    let columns = if advance == 0 {
        area.width
    } else {
        u16::try_from(frame.width_px.div_ceil(advance)).unwrap_or(u16::MAX)
    };
    let rows = u16::try_from(frame.lines.len()).unwrap_or(u16::MAX);

    Rect::new(
        area.x,
        area.y,
        columns.saturating_add(2).min(area.width),
        rows.saturating_add(2).min(area.height),
    )
}

/// Render the panel. Pure with respect to `state`.
pub fn view(frame: &mut Frame, state: &AppState, colors: &PanelColors) {
    let area = panel_area(frame.area(), &state.frame, &state.style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette::BORDER))
        .title(Span::styled(
            format!(" tailwatch · {} ", state.style_kind),
            Style::default().fg(palette::TITLE),
        ))
        .style(colors.background(state.transparent));

    let tone = state.frame.tone;
    let lines: Vec<Line> = state
        .frame
        .lines
        .iter()
        .map(|l| Line::styled(l.text.as_str(), colors.line(l.kind, tone)))
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;
    use tailwatch_app::config::Settings;
    use tailwatch_app::{DisplayLine, LineKind};
    use tailwatch_core::TextTone;

    fn state_with(lines: &[(&str, LineKind)], tone: TextTone, width_px: u32) -> AppState {
        let now = Local.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let mut state = AppState::new(&Settings::default(), now);
        state.frame = DisplayFrame {
            lines: lines
                .iter()
                .map(|(text, kind)| DisplayLine::new(*text, *kind))
                .collect(),
            tone,
            width_px,
        };
        state
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_panel_area_from_pixel_width() {
        let state = state_with(&[("a", LineKind::Log), ("b", LineKind::Log)], TextTone::Normal, 80);
        // Main style advance is 8px: 80px is 10 columns plus borders
        let area = panel_area(Rect::new(0, 0, 100, 40), &state.frame, &state.style);
        assert_eq!(area, Rect::new(0, 0, 12, 4));
    }

    #[test]
    fn test_panel_area_clamped_to_terminal() {
        let state = state_with(&[("a", LineKind::Log); 30], TextTone::Normal, 4000);
        let area = panel_area(Rect::new(0, 0, 50, 10), &state.frame, &state.style);
        assert_eq!(area, Rect::new(0, 0, 50, 10));
    }

    #[test]
    fn test_view_renders_lines_and_title() {
        let state = state_with(
            &[("Daily", LineKind::ConfigHeader), ("[08:00:00 INF] hello", LineKind::Log)],
            TextTone::Normal,
            200,
        );
        let colors = PanelColors::from_style(&state.style);

        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|f| view(f, &state, &colors)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("tailwatch"));
        assert!(content.contains("main"));
        assert!(content.contains("Daily"));
        assert!(content.contains("[08:00:00 INF] hello"));
    }

    #[test]
    fn test_view_colours_follow_tone() {
        let state = state_with(&[("stale line", LineKind::Log)], TextTone::Stale, 200);
        let colors = PanelColors::from_style(&state.style);

        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        terminal.draw(|f| view(f, &state, &colors)).unwrap();

        // First content cell sits inside the border
        let cell = &terminal.backend().buffer()[(1, 1)];
        assert_eq!(cell.symbol(), "s");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_transparent_view_has_no_fill() {
        let mut state = state_with(&[("x", LineKind::Log)], TextTone::Normal, 40);
        state.transparent = true;
        let colors = PanelColors::from_style(&state.style);

        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal.draw(|f| view(f, &state, &colors)).unwrap();

        assert_eq!(terminal.backend().buffer()[(1, 1)].bg, Color::Reset);
    }
}
