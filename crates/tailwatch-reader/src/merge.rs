//! Folding of continuation lines into their timestamped entry

use std::sync::LazyLock;

use regex::Regex;

/// A new entry starts with `[HH:MM:SS.mmm]`
static ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d{2}:\d{2}:\d{2}\.\d{3}\]").expect("Invalid entry start regex")
});

/// Check if a line starts a new log entry
pub fn is_entry_start(line: &str) -> bool {
    ENTRY_START.is_match(line)
}

/// Merge physical lines (oldest first) into logical entries.
///
/// Lines that do not start with a timestamp (exception messages, stack
/// frames, wrapped text) are trimmed and appended to the open entry with a
/// single space. A leading non-timestamp line opens the first entry itself.
pub fn merge_entries<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut merged = Vec::new();
    let mut current: Option<String> = None;

    for line in lines {
        let line = line.as_ref();
        if is_entry_start(line) {
            if let Some(entry) = current.take() {
                merged.push(entry);
            }
            current = Some(line.to_string());
            continue;
        }

        match current.as_mut() {
            Some(entry) => {
                let continuation = line.trim();
                if !continuation.is_empty() {
                    entry.push(' ');
                    entry.push_str(continuation);
                }
            }
            None => current = Some(line.to_string()),
        }
    }

    if let Some(entry) = current {
        merged.push(entry);
    }
    merged
}
