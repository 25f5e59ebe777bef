//! tailwatch-app - Settings, presentation state and orchestration for tailwatch
//!
//! The [`Engine`] drives a [`tailwatch_reader::LogReader`] once per refresh
//! tick, folds its output into an [`AppState`] frame and broadcasts
//! [`EngineEvent`]s to whichever front end is attached (TUI or headless).

pub mod command;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod message;
pub mod signals;
pub mod state;

// Re-export primary types
pub use command::HotkeyCommand;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use message::Message;
pub use state::{AppPhase, AppState, DisplayFrame, DisplayLine, LineKind};
