//! File reference markers embedded in message text.
//!
//! A marker has the exact form `[Uploaded File: <path>]` where `<path>` is
//! non-empty and contains no `]`. Extraction and removal share one pattern so
//! every extracted path corresponds to exactly one removed marker.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

pub const MARKER_PREFIX: &str = "[Uploaded File: ";
pub const MARKER_SUFFIX: &str = "]";

static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[Uploaded File: ([^\]]+)\]").expect("marker pattern compiles")
});

/// Payloads of all markers, in document order, untrimmed.
pub fn extract_references(content: &str) -> Vec<String> {
    let paths: Vec<String> = MARKER_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|payload| payload.as_str().to_string())
        .collect();
    if !paths.is_empty() {
        debug!(count = paths.len(), "extracted file references");
    }
    paths
}

/// Deletes every marker, then trims the outer whitespace of the result.
/// Whitespace left between words by a deletion is kept as is.
pub fn remove_references(content: &str) -> String {
    MARKER_PATTERN.replace_all(content, "").trim().to_string()
}

pub fn count_references(content: &str) -> usize {
    MARKER_PATTERN.find_iter(content).count()
}

pub fn format_reference(path: &str) -> String {
    format!("{MARKER_PREFIX}{path}{MARKER_SUFFIX}")
}

/// Re-embeds `paths` as markers after `content`, space separated.
pub fn append_references<I, S>(content: &str, paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = content.to_string();
    for path in paths {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format_reference(path.as_ref()));
    }
    out
}
