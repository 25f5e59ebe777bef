//! Core domain type definitions

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;

/// Header of a structured BetterGI log line:
/// `[HH:MM:SS.mmm] [LEVEL] Qualified.Source message...`
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\[\d{2}:\d{2}:\d{2}\.\d{3}\])\s+\[(\w+)\]\s+[\w.]+\s*(.*)$")
        .expect("Invalid log header regex")
});

pub const DEFAULT_TASK: &str = "无当前任务";
pub const DEFAULT_CONFIG: &str = "无激活配置组";
pub const DEFAULT_PROGRESS: &str = "0/0";

/// Log severity levels as written by the BetterGI (Serilog) formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Parse the bracketed level tag (`INF`, `DBG`, `Warning`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "VRB" | "VERBOSE" | "TRC" | "TRACE" => Some(LogLevel::Verbose),
            "DBG" | "DEBUG" => Some(LogLevel::Debug),
            "INF" | "INFO" | "INFORMATION" => Some(LogLevel::Info),
            "WRN" | "WARN" | "WARNING" => Some(LogLevel::Warning),
            "ERR" | "ERROR" => Some(LogLevel::Error),
            "FTL" | "FATAL" | "CRITICAL" => Some(LogLevel::Fatal),
            _ => None,
        }
    }

    /// Verbose and debug output, hidden when `skip_debug_log` is on
    pub fn is_verbose(&self) -> bool {
        matches!(self, LogLevel::Verbose | LogLevel::Debug)
    }
}

/// One logical log record.
///
/// Lines matching the header format are decomposed; anything else is kept
/// verbatim so it stays visible to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEntry {
    Structured {
        /// Bracketed timestamp, e.g. `[08:30:00.123]`
        timestamp: String,
        /// Level tag exactly as written, e.g. `INF`
        level: String,
        message: String,
    },
    Unstructured(String),
}

impl RawEntry {
    pub fn parse(line: &str) -> Self {
        match HEADER_PATTERN.captures(line) {
            Some(caps) => RawEntry::Structured {
                timestamp: caps[1].to_string(),
                level: caps[2].to_string(),
                message: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
            },
            None => RawEntry::Unstructured(line.to_string()),
        }
    }

    pub fn level(&self) -> Option<LogLevel> {
        match self {
            RawEntry::Structured { level, .. } => LogLevel::from_tag(level),
            RawEntry::Unstructured(_) => None,
        }
    }

    /// Compact display form: `[HH:MM:SS LEVEL] message`.
    ///
    /// Milliseconds and the source qualifier are dropped; unstructured
    /// entries pass through unchanged.
    pub fn display_line(&self) -> String {
        match self {
            RawEntry::Structured {
                timestamp,
                level,
                message,
            } => {
                // "[08:30:00.123]" -> "[08:30:00"
                let short = timestamp
                    .get(..timestamp.len().saturating_sub(5))
                    .unwrap_or(timestamp);
                format!("{} {}] {}", short, level, message)
            }
            RawEntry::Unstructured(line) => line.clone(),
        }
    }
}

/// Latest task, configuration group and progress seen in the log.
///
/// Values persist across refreshes until a newer log entry replaces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionState {
    pub current_task: String,
    pub current_config: String,
    pub current_progress: String,
}

impl Default for ExtractionState {
    fn default() -> Self {
        Self {
            current_task: DEFAULT_TASK.to_string(),
            current_config: DEFAULT_CONFIG.to_string(),
            current_progress: DEFAULT_PROGRESS.to_string(),
        }
    }
}

/// Task-churn warning state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyWarning {
    pub active: bool,
    pub started_at: Option<DateTime<Local>>,
}

/// Colour tone the presentation layer should use for the whole panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    #[default]
    Normal,
    /// No log activity for a while, or the source is misconfigured
    Stale,
    /// Task churn warning is active
    HighFrequency,
}

impl fmt::Display for TextTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextTone::Normal => write!(f, "normal"),
            TextTone::Stale => write!(f, "stale"),
            TextTone::HighFrequency => write!(f, "high_frequency"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured_line() {
        let entry = RawEntry::parse("[08:30:00.123] [INF] BetterGenshinImpact.Service 配置组 \"Daily\" 加载完成");
        assert_eq!(
            entry,
            RawEntry::Structured {
                timestamp: "[08:30:00.123]".to_string(),
                level: "INF".to_string(),
                message: "配置组 \"Daily\" 加载完成".to_string(),
            }
        );
        assert_eq!(entry.level(), Some(LogLevel::Info));
    }

    #[test]
    fn test_parse_unstructured_line() {
        let entry = RawEntry::parse("   at System.Threading.Tasks.Task.Wait()");
        assert!(matches!(entry, RawEntry::Unstructured(_)));
        assert_eq!(entry.level(), None);
    }

    #[test]
    fn test_display_line_drops_millis_and_qualifier() {
        let entry = RawEntry::parse("[12:01:02.345] [WRN] Foo.Bar something odd");
        assert_eq!(entry.display_line(), "[12:01:02 WRN] something odd");
    }

    #[test]
    fn test_display_line_passthrough() {
        let line = "no header here";
        assert_eq!(RawEntry::parse(line).display_line(), line);
    }

    #[test]
    fn test_display_line_empty_message() {
        let entry = RawEntry::parse("[12:01:02.345] [DBG] Foo.Bar");
        assert_eq!(entry.display_line(), "[12:01:02 DBG] ");
    }

    #[test]
    fn test_level_from_tag() {
        assert_eq!(LogLevel::from_tag("DBG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_tag("dbg"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_tag("VRB"), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::from_tag("ERR"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_tag("XYZ"), None);
    }

    #[test]
    fn test_level_is_verbose() {
        assert!(LogLevel::Debug.is_verbose());
        assert!(LogLevel::Verbose.is_verbose());
        assert!(!LogLevel::Info.is_verbose());
    }

    #[test]
    fn test_extraction_state_defaults() {
        let state = ExtractionState::default();
        assert_eq!(state.current_task, DEFAULT_TASK);
        assert_eq!(state.current_config, DEFAULT_CONFIG);
        assert_eq!(state.current_progress, "0/0");
    }

    #[test]
    fn test_text_tone_display() {
        assert_eq!(TextTone::HighFrequency.to_string(), "high_frequency");
        assert_eq!(TextTone::default(), TextTone::Normal);
    }
}
