//! Tolerant timestamp parsing.
//!
//! Extract timestamps arrive in a handful of spellings. Each value is parsed
//! on its own against the accepted layouts below; anything else is absent.
//!
//! Accepted layouts:
//! - RFC 3339 with offset (`2024-03-01T10:00:00+02:00`), normalized to UTC
//! - `YYYY-MM-DD HH:MM[:SS[.fff]]` and the same with a `T` separator
//! - `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD`, `MM/DD/YYYY` (midnight)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y"];

/// Parse a timestamp cell, returning `None` when no accepted layout matches.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Some(dt);
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, layout) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Whether a timestamp falls exactly on midnight.
pub fn is_midnight(ts: &NaiveDateTime) -> bool {
    ts.time() == NaiveTime::MIN
}

/// Render a timestamp for the processed tables.
///
/// `date_only` drops the time of day; callers set it when every value of a
/// column is at midnight, so a date column stays a date column.
pub fn format_timestamp(ts: &NaiveDateTime, date_only: bool) -> String {
    if date_only {
        ts.format("%Y-%m-%d").to_string()
    } else if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}
