//! Utility functions for text normalization, link identity, and file system checks.
//!
//! This module provides helper functions used throughout the pipeline:
//! - Markup stripping and whitespace-safe truncation for titles and summaries
//! - Status-prefix stripping for Azure update titles
//! - Link slug extraction for announcement identity
//! - File system validation for the output directory

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Bracketed status words Azure prepends to update titles.
const STATUS_PREFIXES: [&str; 5] = [
    "[In preview]",
    "[Generally available]",
    "[Launched]",
    "[In development]",
    "[Retirements]",
];

/// Strip markup and collapse whitespace, truncating to `max_len` characters.
///
/// Tags are replaced with spaces, runs of whitespace collapse to a single
/// space, and the result is trimmed. If the cleaned text is longer than
/// `max_len` characters it is cut at the last whitespace boundary at or
/// before `max_len` and an ellipsis is appended, so the output never splits
/// mid-word and never exceeds `max_len + 1` characters.
///
/// # Arguments
///
/// * `raw` - The raw text, possibly containing HTML fragments
/// * `max_len` - Maximum number of characters to keep before the ellipsis
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("<p>Hello   world</p>", 120), "Hello world");
/// assert_eq!(clean_text("alpha beta gamma", 10), "alpha…");
/// ```
pub fn clean_text(raw: &str, max_len: usize) -> String {
    let text = RE_TAGS.replace_all(raw, " ");
    let text = RE_WS.replace_all(&text, " ");
    let text = text.trim();

    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let prefix: String = text.chars().take(max_len).collect();
    let cut = match prefix.rfind(' ') {
        Some(i) => &prefix[..i],
        None => prefix.as_str(),
    };
    format!("{}…", cut.trim_end())
}

/// Remove one leading bracketed status word from an Azure update title.
///
/// Azure prefixes titles with rollout status like `[In preview]` or
/// `[Generally available]`. The prefix is dropped before generic cleaning;
/// titles without a known prefix are returned unchanged (leading whitespace
/// trimmed either way).
pub fn strip_status_prefix(title: &str) -> &str {
    let trimmed = title.trim_start();
    for prefix in STATUS_PREFIXES {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return rest.trim_start();
        }
    }
    trimmed
}

/// Extract the final path segment of a link, ignoring trailing slashes.
///
/// The slug is the announcement identity used for cross-source dedup, so
/// `/updates/foo-bar/` and `/updates/foo-bar` yield the same value. Returns
/// `None` for an empty link.
pub fn link_slug(link: &str) -> Option<String> {
    let trimmed = link.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rsplit('/').next() {
        Some(slug) if !slug.is_empty() => Some(slug.to_string()),
        _ => None,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte count
/// indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
