//! Active log file resolution for rotating, date-stamped logs
//!
//! BetterGI writes `{prefix}{YYYYMMDD}.log` and, once a file grows past its
//! size limit, `{prefix}{YYYYMMDD}_{N}.log`. The active file is the most
//! recently modified candidate for the target date, falling back to the
//! newest candidate of any date (a task that keeps writing to yesterday's
//! file after midnight).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;
use tailwatch_core::prelude::*;

/// Upper bound on directory entries inspected per lookup
pub const MAX_SCANNED_ENTRIES: usize = 4096;

/// A log file that matches the naming scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// `YYYYMMDD` stamp taken from the file name
    pub date: String,
    pub modified: SystemTime,
}

/// Finds the file currently being written in a log directory
#[derive(Debug, Clone)]
pub struct FileLocator {
    directory: PathBuf,
    prefix: String,
}

impl FileLocator {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }

    /// Resolve the active file for `date`, or `None` when no candidate exists
    pub fn resolve(&self, date: NaiveDate) -> Option<PathBuf> {
        let target = date_stamp(date);
        pick_active(self.candidates(), &target).map(|c| c.path)
    }

    /// Path of the file to create when the directory has no log yet
    pub fn placeholder_path(&self, date: NaiveDate) -> PathBuf {
        self.directory
            .join(format!("{}{}.log", self.prefix, date_stamp(date)))
    }

    /// Enumerate all files matching the naming scheme, any date
    pub fn candidates(&self) -> Vec<Candidate> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Failed to list log directory {}: {}",
                    self.directory.display(),
                    e
                );
                return Vec::new();
            }
        };

        entries
            .take(MAX_SCANNED_ENTRIES)
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let date = match_log_name(name.to_str()?, &self.prefix)?;
                let metadata = entry.metadata().ok()?;
                if !metadata.is_file() {
                    return None;
                }
                let modified = metadata.modified().ok()?;
                Some(Candidate {
                    path: entry.path(),
                    date: date.to_string(),
                    modified,
                })
            })
            .collect()
    }
}

/// Format a date the way log file names carry it
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Return the `YYYYMMDD` stamp if `name` is `{prefix}{stamp}.log` or
/// `{prefix}{stamp}_{suffix}.log`
pub fn match_log_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?.strip_suffix(".log")?;
    let stamp = rest.get(..8)?;
    if !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let suffix = &rest[8..];
    if suffix.is_empty() || suffix.starts_with('_') {
        Some(stamp)
    } else {
        None
    }
}

/// Newest candidate for `target`, else newest overall
pub fn pick_active(candidates: Vec<Candidate>, target: &str) -> Option<Candidate> {
    let (same_day, other_days): (Vec<_>, Vec<_>) =
        candidates.into_iter().partition(|c| c.date == target);

    if !same_day.is_empty() {
        return same_day.into_iter().max_by_key(|c| c.modified);
    }

    let newest = other_days.into_iter().max_by_key(|c| c.modified);
    if let Some(c) = &newest {
        debug!(
            "No log for {}, falling back to newest file {}",
            target,
            c.path.display()
        );
    }
    newest
}

/// Make sure a configured log directory is usable.
///
/// A missing directory is created once. Any failure here marks the source
/// invalid for the lifetime of the reader.
pub fn check_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        warn!("Log directory does not exist: {}", dir.display());
        fs::create_dir_all(dir)
            .map_err(|e| Error::invalid_source(dir, format!("cannot create directory: {}", e)))?;
        info!("Created log directory: {}", dir.display());
    }

    if !dir.is_dir() {
        return Err(Error::invalid_source(dir, "not a directory"));
    }

    fs::read_dir(dir)
        .map_err(|e| Error::invalid_source(dir, format!("directory not readable: {}", e)))?;

    Ok(())
}
