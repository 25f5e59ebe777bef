//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use tailwatch_app::config::{load_settings_or_default, Settings};

/// tailwatch - live tail and task-state monitor for BetterGI logs
#[derive(Parser, Debug)]
#[command(name = "tailwatch", version)]
#[command(about = "Live tail and task-state monitor for rotating BetterGI logs", long_about = None)]
pub struct Args {
    /// Settings file (default: {config_dir}/tailwatch/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log directory, overrides [source] log_path
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log filename prefix, overrides [source] log_filename_prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Run in headless mode (NDJSON output, commands on stdin)
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    /// Load the settings file and apply command-line overrides
    pub fn settings(&self) -> Settings {
        let settings = load_settings_or_default(self.config.as_deref());
        self.apply_overrides(settings)
    }

    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.log_dir {
            settings.source.log_path = dir.to_string_lossy().into_owned();
        }
        if let Some(prefix) = &self.prefix {
            settings.source.log_filename_prefix = prefix.clone();
        }
        settings
    }
}
