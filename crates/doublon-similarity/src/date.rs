//! Calendar-year date similarity.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Parses a calendar date.
///
/// Accepts ISO `YYYY-MM-DD`, RFC 3339 timestamps and timestamps without an offset such as
/// `2023-05-01T00:00:00`. The date part is kept as written, without shifting to UTC.
/// Returns `None` for anything else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Returns 1.0 when both dates fall in the same calendar year, 0 otherwise.
///
/// There is no partial credit for proximity: 31 December and 1 January of the next year
/// score 0. A date that fails to parse also scores 0.
pub fn date_similarity(a: &str, b: &str) -> f64 {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) if a.year() == b.year() => 1.0,
        _ => 0.0,
    }
}
