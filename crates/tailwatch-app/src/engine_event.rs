//! Events broadcast by the engine to front ends

use crate::config::StyleKind;
use crate::state::DisplayFrame;

/// Observable engine output
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The rendered frame changed (content, tone or width)
    FrameUpdated(DisplayFrame),

    /// The active display style was switched
    StyleChanged { style: StyleKind },

    /// The background fill was toggled
    TransparencyChanged { transparent: bool },

    /// The engine is shutting down
    Shutdown,
}

impl EngineEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::FrameUpdated(_) => "frame_updated",
            EngineEvent::StyleChanged { .. } => "style_changed",
            EngineEvent::TransparencyChanged { .. } => "transparency_changed",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}
