//! Compiler warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer and tree builder to report markup they had to recover from.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recovered problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Tree Builder", "discarded unmatched end tag </b> at line 3, column 7");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        let line = format!("[html2js {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Clear all recorded warnings (call before compiling another document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}
