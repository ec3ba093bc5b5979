//! Shared parsing utilities for input files.

use chrono::{NaiveDate, NaiveDateTime};

/// Parses a record date.
///
/// Accepts ISO dates (`2020-03-01`), ISO datetimes with or without
/// fractional seconds (the date part is kept), and US-style `03/01/2020`.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

/// Parses a metric value, tolerating a trailing `%`.
#[must_use]
pub fn parse_metric(s: &str) -> Option<f64> {
    s.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}
