//! Configuration file parsing for tailwatch
//!
//! Supports:
//! - `{config_dir}/tailwatch/config.toml` - Log source, both display styles
//!   and window toggles

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, load_settings_or_default, read_settings};
pub use types::*;
