//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Lowercase and whitespace-normalize a free-text coding label
///
/// Applied to subjects, objects and conceptual metaphors before they are
/// compared or grouped.
pub fn normalize_label(text: &str) -> String {
    normalize_whitespace(text).to_lowercase()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Split a comma-separated list, dropping empty entries
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
