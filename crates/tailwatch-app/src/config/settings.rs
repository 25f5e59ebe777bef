//! Settings loader for config.toml

use std::path::{Path, PathBuf};

use tailwatch_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "tailwatch";

/// Default location: `{config_dir}/tailwatch/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`.
///
/// A missing file yields defaults; an unreadable or invalid file yields
/// defaults with a warning. Loading never fails.
pub fn load_settings(config_path: &Path) -> Settings {
    match read_settings(config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(Error::ConfigNotFound { path }) => {
            debug!("No config file at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            Settings::default()
        }
    }
}

/// Read and parse `config_path`
pub fn read_settings(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        return Err(Error::ConfigNotFound {
            path: config_path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(config_path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("{}: {}", config_path.display(), e)))
}

/// Load from `config_path`, or from the default location when `None`
pub fn load_settings_or_default(config_path: Option<&Path>) -> Settings {
    match config_path {
        Some(path) => load_settings(path),
        None => match default_config_path() {
            Some(path) => load_settings(&path),
            None => {
                warn!("No config directory on this platform, using defaults");
                Settings::default()
            }
        },
    }
}
