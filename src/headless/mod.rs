//! Headless mode - NDJSON output instead of the TUI
//!
//! Every frame change is written to stdout as one JSON object per line, so
//! scripts and overlays can consume the panel without parsing terminal output.
//! Commands are read from stdin, one name per line.
//!
//! # Example Output
//!
//! ```json
//! {"event":"started","style":"main","source_valid":true,"timestamp":1710489600000}
//! {"event":"frame","lines":[{"text":"[当前配置组] Daily","kind":"config_header"}],"tone":"normal","width_px":218,"timestamp":1710489600010}
//! {"event":"stopped","timestamp":1710489700000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tailwatch_app::config::StyleKind;
use tailwatch_app::{DisplayLine, EngineEvent};
use tailwatch_core::prelude::*;
use tailwatch_core::TextTone;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Engine constructed; first frame follows
    Started {
        style: StyleKind,
        source_valid: bool,
        timestamp: i64,
    },

    /// The panel content, tone or width changed
    Frame {
        lines: Vec<DisplayLine>,
        tone: TextTone,
        width_px: u32,
        timestamp: i64,
    },

    StyleChanged { style: StyleKind, timestamp: i64 },

    TransparencyChanged { transparent: bool, timestamp: i64 },

    Stopped { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as one NDJSON line
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json).and_then(|_| stdout.flush()) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn started(style: StyleKind, source_valid: bool) -> Self {
        Self::Started {
            style,
            source_valid,
            timestamp: Self::now(),
        }
    }

    pub fn stopped() -> Self {
        Self::Stopped {
            timestamp: Self::now(),
        }
    }

    /// Translate an engine event; `Shutdown` maps to nothing since
    /// `stopped` is emitted once the loop has exited.
    pub fn from_engine_event(event: &EngineEvent) -> Option<Self> {
        let timestamp = Self::now();
        match event {
            EngineEvent::FrameUpdated(frame) => Some(Self::Frame {
                lines: frame.lines.clone(),
                tone: frame.tone,
                width_px: frame.width_px,
                timestamp,
            }),
            EngineEvent::StyleChanged { style } => Some(Self::StyleChanged {
                style: *style,
                timestamp,
            }),
            EngineEvent::TransparencyChanged { transparent } => {
                Some(Self::TransparencyChanged {
                    transparent: *transparent,
                    timestamp,
                })
            }
            EngineEvent::Shutdown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailwatch_app::{DisplayFrame, LineKind};

    fn to_value(event: &HeadlessEvent) -> serde_json::Value {
        let json = serde_json::to_string(event).expect("serialization failed");
        serde_json::from_str(&json).expect("invalid JSON")
    }

    #[test]
    fn test_started_serialization() {
        let value = to_value(&HeadlessEvent::started(StyleKind::Second, false));

        assert_eq!(value["event"], "started");
        assert_eq!(value["style"], "second");
        assert_eq!(value["source_valid"], false);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_frame_serialization() {
        let frame = DisplayFrame {
            lines: vec![
                DisplayLine::new("[当前配置组] Daily", LineKind::ConfigHeader),
                DisplayLine::new("[08:00:00 INF] hello", LineKind::Log),
            ],
            tone: TextTone::HighFrequency,
            width_px: 218,
        };
        let event = HeadlessEvent::from_engine_event(&EngineEvent::FrameUpdated(frame))
            .expect("frame maps to an event");
        let value = to_value(&event);

        assert_eq!(value["event"], "frame");
        assert_eq!(value["tone"], "high_frequency");
        assert_eq!(value["width_px"], 218);
        assert_eq!(value["lines"][0]["text"], "[当前配置组] Daily");
        assert_eq!(value["lines"][0]["kind"], "config_header");
        assert_eq!(value["lines"][1]["kind"], "log");
    }

    #[test]
    fn test_style_and_transparency_serialization() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::StyleChanged {
            style: StyleKind::Main,
        })
        .unwrap();
        let value = to_value(&event);
        assert_eq!(value["event"], "style_changed");
        assert_eq!(value["style"], "main");

        let event = HeadlessEvent::from_engine_event(&EngineEvent::TransparencyChanged {
            transparent: true,
        })
        .unwrap();
        let value = to_value(&event);
        assert_eq!(value["event"], "transparency_changed");
        assert_eq!(value["transparent"], true);
    }

    #[test]
    fn test_shutdown_not_forwarded() {
        assert!(HeadlessEvent::from_engine_event(&EngineEvent::Shutdown).is_none());
        assert_eq!(to_value(&HeadlessEvent::stopped())["event"], "stopped");
    }
}
