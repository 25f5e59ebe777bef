//! Debug-level entry filtering

use tailwatch_core::RawEntry;

/// Literal level tag searched for in entries without a parsable header
const DEBUG_TAG: &str = "[DBG]";

/// Check if a merged entry is verbose/debug output
pub fn is_debug_entry(entry: &str) -> bool {
    match RawEntry::parse(entry) {
        parsed @ RawEntry::Structured { .. } => {
            parsed.level().is_some_and(|level| level.is_verbose())
        }
        RawEntry::Unstructured(line) => line.contains(DEBUG_TAG),
    }
}

/// Drop whitespace-only entries, and debug entries when `skip_debug` is set
pub fn filter_entries(entries: Vec<String>, skip_debug: bool) -> Vec<String> {
    entries
        .into_iter()
        .filter(|e| !e.trim().is_empty())
        .filter(|e| !(skip_debug && is_debug_entry(e)))
        .collect()
}
