//! `LogReader` - one refresh tick of locate, tail, merge, filter, extract,
//! monitor and render.
//!
//! The reader owns all mutable state (active file, content cache, extracted
//! state, churn monitor). It is driven from a single context; callers must not
//! run two ticks concurrently.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};
use tailwatch_core::prelude::*;
use tailwatch_core::{ExtractionState, FrequencyWarning, RawEntry};

use crate::extract::scan_latest;
use crate::filter::filter_entries;
use crate::frequency::FrequencyMonitor;
use crate::locator::{check_directory, FileLocator};
use crate::merge::merge_entries;
use crate::tail::tail_lines;
use crate::wrap::{TextMeasure, TextWrapper, WrapConfig};

/// Rendered lines kept for fallback when a tail read fails
pub const CACHE_CAPACITY: usize = 100;

/// Lower bound on raw lines read per tick
pub const MIN_READ_LINES: usize = 50;

pub const DEFAULT_DISPLAY_LINES: usize = 11;

/// Shown when the active log exists but has no bytes yet
pub const NEW_FILE_NOTICE: &str = "-- 新日志文件已创建 --";

/// Shown when nothing displayable is left
pub const EMPTY_LOG_NOTICE: &str = "-- 日志内容为空 --";

/// First line of the misconfiguration output
pub const MISCONFIGURED_MARKER: &str = "⚠️ 日志路径配置错误 ⚠️";

/// Fixed output while the log source is unusable
pub const MISCONFIGURED_INSTRUCTIONS: [&str; 11] = [
    MISCONFIGURED_MARKER,
    "",
    "无法找到有效的日志文件，请：",
    "1. 打开配置文件 config.toml",
    "2. 找到 [source] 中的 log_path 配置项",
    "3. 设置为 BetterGI 的日志目录",
    "4. 保存配置文件后重启程序",
    "",
    "也可以通过 --log-dir 参数指定日志目录",
    "",
    "按 Alt+P 关闭程序",
];

/// Where logs come from. Immutable for the lifetime of a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    directory: Option<PathBuf>,
    filename_prefix: String,
    configured: bool,
}

impl LogSource {
    pub fn new(directory: impl Into<PathBuf>, filename_prefix: impl Into<String>) -> Self {
        Self {
            directory: Some(directory.into()),
            filename_prefix: filename_prefix.into(),
            configured: true,
        }
    }

    pub fn unconfigured(filename_prefix: impl Into<String>) -> Self {
        Self {
            directory: None,
            filename_prefix: filename_prefix.into(),
            configured: false,
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn filename_prefix(&self) -> &str {
        &self.filename_prefix
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// The directory, if configured and non-empty
    pub fn usable_directory(&self) -> Option<&Path> {
        if !self.configured {
            return None;
        }
        self.directory().filter(|d| !d.as_os_str().is_empty())
    }
}

/// The file currently being tailed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFile {
    pub path: PathBuf,
    pub last_known_mtime: Option<SystemTime>,
}

/// Formatting options fixed at reader construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaderOptions {
    pub display_lines: usize,
    pub skip_debug: bool,
    /// `None` disables wrapping
    pub wrap: Option<WrapConfig>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            display_lines: DEFAULT_DISPLAY_LINES,
            skip_debug: false,
            wrap: None,
        }
    }
}

impl ReaderOptions {
    /// Raw lines to tail: twice the display count, at least [`MIN_READ_LINES`]
    pub fn read_lines(&self) -> usize {
        (self.display_lines * 2).max(MIN_READ_LINES)
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderContent {
    pub lines: Vec<String>,
    /// `lines` is the fixed misconfiguration text
    pub misconfigured: bool,
}

impl ReaderContent {
    fn log(lines: Vec<String>) -> Self {
        Self {
            lines,
            misconfigured: false,
        }
    }

    fn misconfigured() -> Self {
        Self {
            lines: MISCONFIGURED_INSTRUCTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            misconfigured: true,
        }
    }
}

/// Facade over the locate → tail → merge → filter → extract → render pipeline
#[derive(Debug)]
pub struct LogReader {
    source: LogSource,
    options: ReaderOptions,
    /// `None` once the source is found unusable
    locator: Option<FileLocator>,
    current_date: NaiveDate,
    active: Option<ActiveFile>,
    cache: VecDeque<String>,
    state: ExtractionState,
    monitor: FrequencyMonitor,
    wrapper: Option<TextWrapper>,
}

impl LogReader {
    pub fn new(source: LogSource, options: ReaderOptions) -> Self {
        Self::new_at(source, options, Local::now())
    }

    /// Construct as if the current time were `now`
    pub fn new_at(source: LogSource, options: ReaderOptions, now: DateTime<Local>) -> Self {
        let wrapper = options.wrap.map(TextWrapper::new);
        Self::build(source, options, wrapper, now)
    }

    /// Construct with a custom measurement backend for wrapping
    pub fn with_measure(
        source: LogSource,
        options: ReaderOptions,
        measure: Box<dyn TextMeasure + Send>,
        now: DateTime<Local>,
    ) -> Self {
        let wrapper = options
            .wrap
            .map(|wrap| TextWrapper::with_measure(wrap.max_width_px, measure));
        Self::build(source, options, wrapper, now)
    }

    fn build(
        source: LogSource,
        options: ReaderOptions,
        wrapper: Option<TextWrapper>,
        now: DateTime<Local>,
    ) -> Self {
        let locator = match open_locator(&source) {
            Ok(locator) => Some(locator),
            Err(e @ Error::SourceNotConfigured) => {
                warn!("{}", e);
                None
            }
            Err(e) => {
                error!("Log source unusable: {}", e);
                None
            }
        };

        let mut reader = Self {
            source,
            options,
            locator,
            current_date: now.date_naive(),
            active: None,
            cache: VecDeque::with_capacity(CACHE_CAPACITY),
            state: ExtractionState::default(),
            monitor: FrequencyMonitor::new(),
            wrapper,
        };
        reader.update_active_file();
        reader
    }

    pub fn get_content(&mut self) -> ReaderContent {
        self.get_content_at(Local::now())
    }

    /// Run one refresh tick as of `now`
    pub fn get_content_at(&mut self, now: DateTime<Local>) -> ReaderContent {
        if self.locator.is_none() {
            return ReaderContent::misconfigured();
        }

        let today = now.date_naive();
        if today != self.current_date {
            info!("Date changed {} -> {}", self.current_date, today);
            self.current_date = today;
        }
        self.update_active_file();

        let tail = self.active.as_ref().and_then(|active| {
            match tail_lines(&active.path, self.options.read_lines()) {
                Ok(lines) => Some(lines),
                Err(e) => {
                    warn!("Tail read failed, using cached content: {}", e);
                    None
                }
            }
        });

        self.process_tail(tail, now)
    }

    /// Everything after the tail read; `None` means the read failed
    fn process_tail(&mut self, tail: Option<Vec<String>>, now: DateTime<Local>) -> ReaderContent {
        let Some(raw) = tail else {
            let lines = if self.cache.is_empty() {
                vec![EMPTY_LOG_NOTICE.to_string()]
            } else {
                self.cache.iter().cloned().collect()
            };
            return ReaderContent::log(lines);
        };

        // Extraction sees debug entries even when the display hides them
        let merged = merge_entries(&raw);

        let previous_task = self.state.current_task.clone();
        scan_latest(&merged, &mut self.state);
        if self.state.current_task != previous_task {
            debug!(
                "Task changed: {} -> {}",
                previous_task, self.state.current_task
            );
            self.monitor.record_switch(now);
        }
        self.monitor.tick(now);

        let entries = filter_entries(merged, self.options.skip_debug);
        let display_lines = self.options.display_lines;
        let formatted: Vec<String> = if entries.is_empty() {
            vec![self.empty_notice().to_string()]
        } else {
            let start = entries.len().saturating_sub(display_lines);
            entries[start..]
                .iter()
                .map(|e| RawEntry::parse(e).display_line())
                .collect()
        };

        let lines = match &self.wrapper {
            Some(wrapper) => {
                let wrapped: Vec<String> = formatted.iter().flat_map(|l| wrapper.wrap(l)).collect();
                let start = wrapped.len().saturating_sub(display_lines);
                wrapped[start..].to_vec()
            }
            None => formatted,
        };

        self.store_cache(&lines);
        ReaderContent::log(lines)
    }

    fn empty_notice(&self) -> &'static str {
        let zero_bytes = self
            .active
            .as_ref()
            .and_then(|active| fs::metadata(&active.path).ok())
            .is_some_and(|meta| meta.len() == 0);
        if zero_bytes {
            NEW_FILE_NOTICE
        } else {
            EMPTY_LOG_NOTICE
        }
    }

    fn store_cache(&mut self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        self.cache.clear();
        let start = lines.len().saturating_sub(CACHE_CAPACITY);
        self.cache.extend(lines[start..].iter().cloned());
    }

    /// Resolve the active file, creating an empty placeholder if none exists
    fn update_active_file(&mut self) {
        let Some(locator) = &self.locator else {
            return;
        };

        let path = match locator.resolve(self.current_date) {
            Some(path) => path,
            None => {
                let path = locator.placeholder_path(self.current_date);
                match create_placeholder(&path) {
                    Ok(()) => info!("Created empty log file {}", path.display()),
                    Err(e) => warn!("Failed to create log file {}: {}", path.display(), e),
                }
                path
            }
        };

        let mtime = fs::metadata(&path).and_then(|m| m.modified()).ok();

        match &mut self.active {
            Some(active) if active.path == path => {
                if active.last_known_mtime != mtime {
                    trace!("Log file updated: {}", path.display());
                    active.last_known_mtime = mtime;
                }
            }
            _ => {
                info!("Switched to log file {}", path.display());
                self.active = Some(ActiveFile {
                    path,
                    last_known_mtime: mtime,
                });
                self.cache.clear();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> &ExtractionState {
        &self.state
    }

    pub fn warning(&self) -> FrequencyWarning {
        self.monitor.warning()
    }

    pub fn switch_count(&self) -> usize {
        self.monitor.switch_count()
    }

    pub fn source(&self) -> &LogSource {
        &self.source
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn active_file(&self) -> Option<&ActiveFile> {
        self.active.as_ref()
    }

    /// False when the source is unconfigured or unusable
    pub fn is_valid(&self) -> bool {
        self.locator.is_some()
    }
}

/// Validate the source directory, creating it if missing
fn open_locator(source: &LogSource) -> Result<FileLocator> {
    let dir = source
        .usable_directory()
        .ok_or(Error::SourceNotConfigured)?;
    check_directory(dir)?;
    Ok(FileLocator::new(dir, source.filename_prefix()))
}

fn create_placeholder(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}
