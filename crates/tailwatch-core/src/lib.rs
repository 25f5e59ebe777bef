//! # tailwatch-core - Core Domain Types
//!
//! Foundation crate for tailwatch. Provides domain types, error handling and
//! logging setup shared by the reader, app and TUI crates.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`RawEntry`] - One logical log record, structured or verbatim
//! - [`LogLevel`] - Log severity parsed from the bracketed level tag
//! - [`ExtractionState`] - Latest task / config group / progress
//! - [`FrequencyWarning`] - Task churn warning state
//! - [`TextTone`] - Panel colour tone
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Startup, terminal, log source and config failures
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Log an error with context as it propagates
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use tailwatch_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all tailwatch crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use types::{
    ExtractionState, FrequencyWarning, LogLevel, RawEntry, TextTone, DEFAULT_CONFIG,
    DEFAULT_PROGRESS, DEFAULT_TASK,
};
