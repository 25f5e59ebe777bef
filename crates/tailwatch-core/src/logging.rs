//! Diagnostics for tailwatch itself, as opposed to the BetterGI log it tails.
//!
//! Nothing is ever written to the terminal. The TUI owns the screen, and in
//! headless mode stdout carries one NDJSON event per line, so a stray log line
//! there would break consumers. Everything goes to a daily-rolling file.
//!
//! ```bash
//! TAILWATCH_LOG=debug tailwatch
//! TAILWATCH_LOG=tailwatch_reader=trace tailwatch --headless
//! ```

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV_VAR: &str = "TAILWATCH_LOG";

/// Covers every `tailwatch_*` crate; dependencies only report warnings
const DEFAULT_DIRECTIVES: &str = "tailwatch=info,warn";

const LOG_FILE_NAME: &str = "tailwatch.log";

/// Install the file subscriber and return the directory it writes to
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    tracing_subscriber::registry()
        .with(filter_from(std::env::var(LOG_ENV_VAR).ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(file_appender(&log_dir))
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        "tailwatch {} starting, diagnostics in {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(log_dir)
}

/// `{data_local_dir}/tailwatch/logs`, or `./tailwatch/logs` without one
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tailwatch")
        .join("logs")
}

fn file_appender(log_dir: &Path) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME)
}

/// Directives from the environment, falling back to the defaults when unset
/// or unparsable
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
