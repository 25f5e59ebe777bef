//! tailwatch - live tail and task-state monitor for rotating BetterGI logs
//!
//! The binary wires the workspace crates together: settings from
//! `tailwatch-app`, the reader pipeline from `tailwatch-reader`, and either
//! the ratatui front end from `tailwatch-tui` or the NDJSON headless mode.

pub mod cli;
pub mod headless;

pub use cli::Args;
pub use headless::runner::run_headless;
pub use tailwatch_tui::run as run_tui;
