//! # tailwatch-reader - Log Tailing and State Extraction
//!
//! Turns a directory of rotating BetterGI logs into display-ready lines plus
//! the latest task, configuration group and progress.
//!
//! ## Pipeline
//!
//! One call to [`LogReader::get_content`] per refresh tick:
//!
//! 1. [`locator`] - pick the active `{prefix}{YYYYMMDD}[_N].log`
//! 2. [`tail`] - read the last lines backwards in 1 KiB blocks
//! 3. [`merge`] - fold stack traces into their timestamped entry
//! 4. [`filter`] - drop debug entries when asked
//! 5. [`extract`] - latest-first scan for task / config group / progress
//! 6. [`frequency`] - task churn warning with hysteresis
//! 7. [`wrap`] - reflow to a pixel budget
//!
//! The reader never fails: I/O problems fall back to the last rendered lines
//! and an unusable source yields a fixed instruction text.

pub mod extract;
pub mod filter;
pub mod frequency;
pub mod locator;
pub mod merge;
pub mod reader;
pub mod tail;
pub mod wrap;

pub use extract::{extract_config, extract_progress, extract_task, scan_latest, TaskKind};
pub use filter::{filter_entries, is_debug_entry};
pub use frequency::FrequencyMonitor;
pub use locator::FileLocator;
pub use merge::merge_entries;
pub use reader::{
    ActiveFile, LogReader, LogSource, ReaderContent, ReaderOptions, EMPTY_LOG_NOTICE,
    MISCONFIGURED_INSTRUCTIONS, MISCONFIGURED_MARKER, NEW_FILE_NOTICE,
};
pub use tail::tail_lines;
pub use wrap::{
    FontSpec, MeasureError, MonospaceMetrics, TextMeasure, TextWrapper, WrapConfig,
    CONTINUATION_INDENT,
};
