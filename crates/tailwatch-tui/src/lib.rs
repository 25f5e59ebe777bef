//! tailwatch-tui - Terminal UI for tailwatch
//!
//! Draws the engine's frame as a bordered panel with ratatui and turns key
//! chords into engine commands.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;

// Re-export main entry point
pub use runner::run;
