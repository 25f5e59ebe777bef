//! Error types for tailwatch
//!
//! Reader failures never reach the display: the reader logs them and falls
//! back to cached lines or the misconfiguration text. Errors only propagate
//! out of startup (terminal, config) and out of front-end I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Log source
    // ─────────────────────────────────────────────────────────────
    #[error("Log directory is not configured")]
    SourceNotConfigured,

    #[error("Log directory unusable: {path} ({reason})")]
    InvalidSource { path: PathBuf, reason: String },

    #[error("Failed to read log file {path}: {message}")]
    TailRead { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid config file {message}")]
    Config { message: String },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },
}

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn invalid_source(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn tail_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TailRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Log an error at the point it leaves a front end
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {}", context.into(), err);
            err
        })
    }
}
