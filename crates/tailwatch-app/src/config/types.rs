//! Configuration types for tailwatch
//!
//! Defines:
//! - `Settings` - Everything read from `config.toml`
//! - `StyleSettings` - A fully resolved display style
//! - `StyleOverrides` - Optional per-key overrides for one style section

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tailwatch_reader::{FontSpec, LogSource, ReaderOptions, WrapConfig};

pub const DEFAULT_LOG_PREFIX: &str = "better-genshin-impact";

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub source: SourceSettings,

    /// Overrides for the main style
    #[serde(default)]
    pub style: StyleOverrides,

    /// Overrides for the second style
    #[serde(default)]
    pub second_style: StyleOverrides,

    #[serde(default)]
    pub window: WindowSettings,
}

impl Settings {
    /// Resolve a display style: built-in defaults with this file's overrides
    pub fn style(&self, kind: StyleKind) -> StyleSettings {
        match kind {
            StyleKind::Main => StyleSettings::main().merged(&self.style),
            StyleKind::Second => StyleSettings::second().merged(&self.second_style),
        }
    }

    /// Style to start in
    pub fn initial_style(&self) -> StyleKind {
        if self.window.author_style {
            StyleKind::Second
        } else {
            StyleKind::Main
        }
    }

    /// Log source described by `[source]`; an empty path is unconfigured
    pub fn log_source(&self) -> LogSource {
        let path = self.source.log_path.trim();
        if path.is_empty() {
            LogSource::unconfigured(self.source.log_filename_prefix.clone())
        } else {
            LogSource::new(PathBuf::from(path), self.source.log_filename_prefix.clone())
        }
    }
}

/// Log source settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceSettings {
    /// BetterGI log directory; empty means not configured
    #[serde(default)]
    pub log_path: String,

    #[serde(default = "default_log_prefix")]
    pub log_filename_prefix: String,

    /// Hide DBG/VRB entries
    #[serde(default)]
    pub skip_debug_log: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            log_path: String::new(),
            log_filename_prefix: default_log_prefix(),
            skip_debug_log: false,
        }
    }
}

fn default_log_prefix() -> String {
    DEFAULT_LOG_PREFIX.to_string()
}

/// Window behaviour toggles
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WindowSettings {
    /// Start without a background fill
    #[serde(default)]
    pub transparent_mode: bool,

    /// Start in the second style
    #[serde(default)]
    pub author_style: bool,
}

/// Which of the two display styles is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    #[default]
    Main,
    Second,
}

impl StyleKind {
    pub fn toggled(self) -> Self {
        match self {
            StyleKind::Main => StyleKind::Second,
            StyleKind::Second => StyleKind::Main,
        }
    }
}

impl std::fmt::Display for StyleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleKind::Main => write!(f, "main"),
            StyleKind::Second => write!(f, "second"),
        }
    }
}

/// A fully resolved display style
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleSettings {
    pub bg_color: String,
    pub normal_color: String,
    pub stale_color: String,
    pub high_freq_color: String,
    pub status_header_color: String,
    pub task_header_color: String,
    /// Points
    pub font_size: f32,
    /// Pixels
    pub max_width: u32,
    pub display_lines: usize,
    pub refresh_interval_ms: u64,
    pub auto_wrap: bool,
}

impl StyleSettings {
    /// Built-in defaults of the main style
    pub fn main() -> Self {
        Self {
            bg_color: "#000000".to_string(),
            normal_color: "#00FF00".to_string(),
            stale_color: "#FF0000".to_string(),
            high_freq_color: "#FFA500".to_string(),
            status_header_color: "#87CEFA".to_string(),
            task_header_color: "#87CEFA".to_string(),
            font_size: 11.0,
            max_width: 460,
            display_lines: 11,
            refresh_interval_ms: 1000,
            auto_wrap: false,
        }
    }

    /// Built-in defaults of the second style
    pub fn second() -> Self {
        Self {
            bg_color: "#000000".to_string(),
            normal_color: "#FFFFFF".to_string(),
            stale_color: "#FFFFFF".to_string(),
            high_freq_color: "#FFFFFF".to_string(),
            status_header_color: "#00FF00".to_string(),
            task_header_color: "#00FFFF".to_string(),
            font_size: 9.0,
            max_width: 460,
            display_lines: 12,
            refresh_interval_ms: 500,
            auto_wrap: true,
        }
    }

    /// Apply the overrides that are set
    pub fn merged(mut self, overrides: &StyleOverrides) -> Self {
        apply(&mut self.bg_color, &overrides.bg_color);
        apply(&mut self.normal_color, &overrides.normal_color);
        apply(&mut self.stale_color, &overrides.stale_color);
        apply(&mut self.high_freq_color, &overrides.high_freq_color);
        apply(&mut self.status_header_color, &overrides.status_header_color);
        apply(&mut self.task_header_color, &overrides.task_header_color);
        apply(&mut self.font_size, &overrides.font_size);
        apply(&mut self.max_width, &overrides.max_width);
        apply(&mut self.display_lines, &overrides.display_lines);
        apply(&mut self.refresh_interval_ms, &overrides.refresh_interval_ms);
        apply(&mut self.auto_wrap, &overrides.auto_wrap);
        self
    }

    pub fn font(&self) -> FontSpec {
        FontSpec {
            size_pt: self.font_size,
        }
    }

    pub fn wrap_config(&self) -> WrapConfig {
        WrapConfig {
            max_width_px: self.max_width,
            font: self.font(),
        }
    }

    /// Reader options for this style
    pub fn reader_options(&self, skip_debug: bool) -> ReaderOptions {
        ReaderOptions {
            display_lines: self.display_lines.max(1),
            skip_debug,
            wrap: self.auto_wrap.then(|| self.wrap_config()),
        }
    }

    /// Tick interval, never below 50ms
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(50))
    }
}

fn apply<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Optional overrides for one style section; unset keys keep the defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_freq_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_lines: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_wrap: Option<bool>,
}
