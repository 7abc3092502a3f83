//! Event name and value formatting.
//!
//! Event names carry their date as a parenthesised `(M/D/YYYY)` suffix,
//! e.g. "Block Wars (4/5/2024)". These helpers pull that date out, strip it
//! for display, and parse the various date strings found in the history file.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static EMBEDDED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{1,2}/\d{1,2}/\d{4})\)").expect("valid embedded date regex")
});
static EMBEDDED_DATE_WITH_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\(\d{1,2}/\d{1,2}/\d{4}\)").expect("valid embedded date regex")
});

/// The `M/D/YYYY` date embedded in an event name, verbatim.
pub fn extract_date_from_event_name(name: &str) -> Option<&str> {
    if name.is_empty() {
        return None;
    }
    EMBEDDED_DATE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The event name without its ` (M/D/YYYY)` part, trimmed.
pub fn strip_date_from_event_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    EMBEDDED_DATE_WITH_SPACE
        .replacen(name, 1, "")
        .trim()
        .to_string()
}

/// The embedded event date as a calendar date. Impossible dates ("2/30/2024") are `None`.
pub fn parse_embedded_date(name: &str) -> Option<NaiveDate> {
    let raw = extract_date_from_event_name(name)?;
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// Parse a record's `event_date`.
///
/// Accepts ISO dates, RFC 3339 timestamps, ISO date-times with or without
/// the `T` separator, and US-style `M/D/YYYY`.
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Long-form display date, e.g. "April 5, 2024".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Rating with two decimals, as shown in tables and stat cards.
pub fn format_rating(rating: f64) -> String {
    format!("{:.2}", rating)
}

/// Signed whole-number rating change, e.g. "+12" or "-7".
pub fn format_rating_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.0}", change)
    } else {
        format!("{:.0}", change)
    }
}
