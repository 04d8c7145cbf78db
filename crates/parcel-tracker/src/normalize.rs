//! Helpers shared by the per-platform adapters when building a
//! [`parcel_core::TrackingInfo`].

use chrono::{Local, NaiveDateTime, TimeZone};

const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layouts platforms are known to use for their status timestamps.
const INPUT_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M"];

/// Rewrites a platform timestamp into `YYYY-MM-DD HH:MM:SS`.
///
/// Text that matches none of the known layouts is returned trimmed but
/// otherwise untouched.
#[must_use]
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map_or_else(|| trimmed.to_owned(), |dt| dt.format(OUTPUT_FORMAT).to_string())
}

/// Formats a UNIX timestamp in the host's local time zone.
#[must_use]
pub fn format_unix_local(secs: i64) -> Option<String> {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.format(OUTPUT_FORMAT).to_string())
}

/// Delivered detection: `true` when `status` contains any of `phrases`.
///
/// Phrases are literal substrings copied from each platform's UI. A wording
/// change on the platform side turns detection off silently.
#[must_use]
pub fn contains_any(status: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| status.contains(p))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
