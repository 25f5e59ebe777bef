//! Presentation state: turns reader output into a colourable frame

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use tailwatch_core::prelude::*;
use tailwatch_core::{ExtractionState, TextTone};
use tailwatch_reader::{LogReader, MonospaceMetrics, ReaderContent, TextMeasure, TextWrapper};

use crate::config::{Settings, StyleKind, StyleSettings};

/// Displayed lines unchanged for longer than this turn the panel stale
pub const STALE_AFTER_SECS: i64 = 60;

/// Padding added to the widest line
pub const WIDTH_MARGIN_PX: u32 = 2;

/// Header lines shown above the log lines
pub const HEADER_LINES: usize = 2;

/// Role of a frame line, used to pick its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Warning,
    ConfigHeader,
    TaskHeader,
    Log,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLine {
    pub text: String,
    pub kind: LineKind,
}

impl DisplayLine {
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Everything a front end needs to draw one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayFrame {
    pub lines: Vec<DisplayLine>,
    pub tone: TextTone,
    /// Panel width in pixels for the active font
    pub width_px: u32,
}

impl DisplayFrame {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

/// Reader side-channel state captured after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: ExtractionState,
    pub warning_active: bool,
    pub switch_count: usize,
}

impl StatusSnapshot {
    pub fn from_reader(reader: &LogReader) -> Self {
        Self {
            state: reader.state().clone(),
            warning_active: reader.warning().active,
            switch_count: reader.switch_count(),
        }
    }
}

pub fn warning_line(switch_count: usize) -> String {
    format!("⚠️ 任务切换过于频繁 ({}次/分钟) ⚠️", switch_count)
}

pub fn config_line(state: &ExtractionState) -> String {
    format!("[当前配置组] {}", state.current_config)
}

pub fn task_line(state: &ExtractionState) -> String {
    format!(
        "[当前任务] [{}] {}",
        state.current_progress, state.current_task
    )
}

/// Build the frame for one tick
pub fn compose_frame(
    content: &ReaderContent,
    status: &StatusSnapshot,
    style: &StyleSettings,
    log_stale: bool,
) -> DisplayFrame {
    if content.misconfigured {
        let lines: Vec<DisplayLine> = content
            .lines
            .iter()
            .map(|l| DisplayLine::new(l.clone(), LineKind::Notice))
            .collect();
        let width_px = frame_width(&lines, style);
        return DisplayFrame {
            lines,
            tone: TextTone::Stale,
            width_px,
        };
    }

    let mut lines = Vec::with_capacity(content.lines.len() + HEADER_LINES + 1);
    if status.warning_active {
        lines.push(DisplayLine::new(
            warning_line(status.switch_count),
            LineKind::Warning,
        ));
    }
    lines.push(DisplayLine::new(
        config_line(&status.state),
        LineKind::ConfigHeader,
    ));
    lines.push(DisplayLine::new(
        task_line(&status.state),
        LineKind::TaskHeader,
    ));

    // Headers never wrap; cut them to the panel instead
    if style.auto_wrap {
        let wrapper = TextWrapper::new(style.wrap_config());
        for header in lines.iter_mut() {
            header.text = wrapper.truncate(&header.text);
        }
    }

    lines.extend(
        content
            .lines
            .iter()
            .map(|l| DisplayLine::new(l.clone(), LineKind::Log)),
    );
    lines.truncate(style.display_lines + HEADER_LINES);

    let tone = if status.warning_active {
        TextTone::HighFrequency
    } else if log_stale {
        TextTone::Stale
    } else {
        TextTone::Normal
    };

    let width_px = frame_width(&lines, style);
    DisplayFrame {
        lines,
        tone,
        width_px,
    }
}

/// Widest line plus margin, capped at the style's maximum.
/// Wrapped styles always use the full width.
fn frame_width(lines: &[DisplayLine], style: &StyleSettings) -> u32 {
    if style.auto_wrap {
        return style.max_width;
    }

    let metrics = MonospaceMetrics::for_font(style.font());
    let mut widest = 0;
    for line in lines {
        match metrics.measure(&line.text) {
            Ok(width) => widest = widest.max(width),
            Err(e) => {
                debug!("Cannot measure frame width, using maximum: {}", e);
                return style.max_width;
            }
        }
    }
    (widest + WIDTH_MARGIN_PX).min(style.max_width)
}

/// Application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Presentation model shared by the TUI and headless front ends
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: AppPhase,
    pub style_kind: StyleKind,
    pub style: StyleSettings,
    /// Draw without a background fill
    pub transparent: bool,
    /// Last composed frame
    pub frame: DisplayFrame,
    /// Lines of the last frame that counted as a change
    last_lines: Vec<DisplayLine>,
    last_change_at: DateTime<Local>,
}

impl AppState {
    pub fn new(settings: &Settings, now: DateTime<Local>) -> Self {
        let style_kind = settings.initial_style();
        Self {
            phase: AppPhase::Running,
            style_kind,
            style: settings.style(style_kind),
            transparent: settings.window.transparent_mode,
            frame: DisplayFrame::default(),
            last_lines: Vec::new(),
            last_change_at: now,
        }
    }

    pub fn apply_style(&mut self, kind: StyleKind, style: StyleSettings) {
        self.style_kind = kind;
        self.style = style;
    }

    /// Flip the background fill, returning the new value
    pub fn toggle_transparent(&mut self) -> bool {
        self.transparent = !self.transparent;
        self.transparent
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// No displayed line changed for more than [`STALE_AFTER_SECS`]
    pub fn is_stale(&self, now: DateTime<Local>) -> bool {
        now - self.last_change_at > TimeDelta::seconds(STALE_AFTER_SECS)
    }

    /// Fold one tick's output into the frame. Returns true if the frame changed.
    pub fn update(
        &mut self,
        content: &ReaderContent,
        status: &StatusSnapshot,
        now: DateTime<Local>,
    ) -> bool {
        // Headers count, so a progress update alone keeps the panel fresh
        let fresh = compose_frame(content, status, &self.style, false);
        if !content.misconfigured && fresh.lines != self.last_lines {
            self.last_lines = fresh.lines.clone();
            self.last_change_at = now;
        }

        let frame = if self.is_stale(now) {
            compose_frame(content, status, &self.style, true)
        } else {
            fresh
        };
        if frame == self.frame {
            return false;
        }
        if frame.tone != self.frame.tone {
            debug!("Panel tone {} -> {}", self.frame.tone, frame.tone);
        }
        self.frame = frame;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tailwatch_reader::FontSpec;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()
    }

    fn content(lines: &[&str]) -> ReaderContent {
        ReaderContent {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            misconfigured: false,
        }
    }

    fn status() -> StatusSnapshot {
        StatusSnapshot {
            state: ExtractionState {
                current_task: "JS脚本: AutoCook.js".to_string(),
                current_config: "Daily".to_string(),
                current_progress: "2/5".to_string(),
            },
            warning_active: false,
            switch_count: 1,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame composition
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_headers_precede_log_lines() {
        let frame = compose_frame(
            &content(&["[08:00:00 INF] a"]),
            &status(),
            &StyleSettings::main(),
            false,
        );
        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(
            texts,
            vec![
                "[当前配置组] Daily",
                "[当前任务] [2/5] JS脚本: AutoCook.js",
                "[08:00:00 INF] a",
            ]
        );
        assert_eq!(frame.lines[0].kind, LineKind::ConfigHeader);
        assert_eq!(frame.lines[1].kind, LineKind::TaskHeader);
        assert_eq!(frame.lines[2].kind, LineKind::Log);
        assert_eq!(frame.tone, TextTone::Normal);
    }

    #[test]
    fn test_warning_line_and_tone() {
        let mut status = status();
        status.warning_active = true;
        status.switch_count = 6;

        let frame = compose_frame(&content(&[]), &status, &StyleSettings::main(), true);
        assert_eq!(frame.lines[0].text, "⚠️ 任务切换过于频繁 (6次/分钟) ⚠️");
        assert_eq!(frame.lines[0].kind, LineKind::Warning);
        // Churn wins over staleness
        assert_eq!(frame.tone, TextTone::HighFrequency);
    }

    #[test]
    fn test_stale_tone() {
        let frame = compose_frame(&content(&[]), &status(), &StyleSettings::main(), true);
        assert_eq!(frame.tone, TextTone::Stale);
    }

    #[test]
    fn test_misconfigured_is_notice_and_stale() {
        let reader_output = ReaderContent {
            lines: vec!["⚠️ 日志路径配置错误 ⚠️".to_string(), String::new()],
            misconfigured: true,
        };
        let frame = compose_frame(&reader_output, &status(), &StyleSettings::main(), false);

        assert_eq!(frame.lines.len(), 2);
        assert!(frame.lines.iter().all(|l| l.kind == LineKind::Notice));
        assert_eq!(frame.tone, TextTone::Stale);
    }

    #[test]
    fn test_frame_capped_at_display_lines_plus_headers() {
        let mut style = StyleSettings::main();
        style.display_lines = 3;
        let mut status = status();
        status.warning_active = true;

        let frame = compose_frame(&content(&["a", "b", "c"]), &status, &style, false);
        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[3], "a");
        assert_eq!(texts[4], "b");
    }

    #[test]
    fn test_headers_truncated_when_wrapping() {
        let mut style = StyleSettings::main();
        style.auto_wrap = true;
        style.max_width = 100;

        let frame = compose_frame(&content(&[]), &status(), &style, false);
        let metrics = MonospaceMetrics::for_font(style.font());
        for line in &frame.lines {
            assert!(metrics.measure(&line.text).unwrap() <= 98);
        }
        assert_eq!(frame.width_px, 100);
    }

    #[test]
    fn test_width_follows_widest_line() {
        let style = StyleSettings::main();
        let frame = compose_frame(&content(&["short"]), &status(), &style, false);

        let metrics = MonospaceMetrics::for_font(FontSpec { size_pt: 11.0 });
        let widest = frame
            .texts()
            .map(|t| metrics.measure(t).unwrap())
            .max()
            .unwrap();
        assert_eq!(frame.width_px, widest + WIDTH_MARGIN_PX);
    }

    #[test]
    fn test_width_capped() {
        let mut style = StyleSettings::main();
        style.max_width = 50;
        let frame = compose_frame(&content(&["a very long log line"]), &status(), &style, false);
        assert_eq!(frame.width_px, 50);
    }

    #[test]
    fn test_width_with_invalid_font_uses_maximum() {
        let mut style = StyleSettings::main();
        style.font_size = 0.0;
        let frame = compose_frame(&content(&["x"]), &status(), &style, false);
        assert_eq!(frame.width_px, style.max_width);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AppState
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_update_reports_changes_only() {
        let mut state = AppState::new(&Settings::default(), now());
        assert!(state.update(&content(&["a"]), &status(), now()));
        assert!(!state.update(&content(&["a"]), &status(), now()));
        assert!(state.update(&content(&["a", "b"]), &status(), now()));
    }

    #[test]
    fn test_stale_after_a_quiet_minute() {
        let mut state = AppState::new(&Settings::default(), now());
        state.update(&content(&["a"]), &status(), now());

        state.update(&content(&["a"]), &status(), now() + TimeDelta::seconds(60));
        assert_eq!(state.frame.tone, TextTone::Normal);

        assert!(state.update(&content(&["a"]), &status(), now() + TimeDelta::seconds(61)));
        assert_eq!(state.frame.tone, TextTone::Stale);

        // New content clears it
        state.update(&content(&["a", "b"]), &status(), now() + TimeDelta::seconds(62));
        assert_eq!(state.frame.tone, TextTone::Normal);
    }

    #[test]
    fn test_progress_change_resets_staleness() {
        let mut state = AppState::new(&Settings::default(), now());
        state.update(&content(&["a"]), &status(), now());

        state.update(&content(&["a"]), &status(), now() + TimeDelta::seconds(90));
        assert_eq!(state.frame.tone, TextTone::Stale);

        let mut other = status();
        other.state.current_progress = "3/5".to_string();
        assert!(state.update(&content(&["a"]), &other, now() + TimeDelta::seconds(91)));
        assert_eq!(state.frame.tone, TextTone::Normal);

        state.update(&content(&["a"]), &other, now() + TimeDelta::seconds(152));
        assert_eq!(state.frame.tone, TextTone::Stale);
    }

    #[test]
    fn test_initial_style_from_settings() {
        let mut settings = Settings::default();
        settings.window.author_style = true;
        settings.window.transparent_mode = true;

        let state = AppState::new(&settings, now());
        assert_eq!(state.style_kind, StyleKind::Second);
        assert_eq!(state.style, StyleSettings::second());
        assert!(state.transparent);
    }

    #[test]
    fn test_toggle_transparent_and_quit() {
        let mut state = AppState::new(&Settings::default(), now());
        assert!(state.toggle_transparent());
        assert!(!state.toggle_transparent());
        assert!(!state.should_quit());
        state.request_quit();
        assert!(state.should_quit());
    }
}
