//! Timestamp parsing for `happened_at`
//!
//! Accepted inputs:
//! - ISO-8601 date-time with offset (`2020-05-16T18:00:00+02:00`), stored as UTC
//! - ISO-8601 date-time without offset (`2020-05-16T18:00:00`, `T` or space)
//! - Unix timestamp as a JSON number or numeric string; values above
//!   `MS_WATERSHED` are taken as milliseconds
//!
//! A date without a time part is rejected.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use super::FieldErrorKind;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Unix values larger than this (in magnitude) are milliseconds, not seconds
const MS_WATERSHED: f64 = 2e10;

/// Parse a timestamp from a JSON string or number.
pub fn parse_timestamp(value: &Value) -> Result<NaiveDateTime, FieldErrorKind> {
    match value {
        Value::String(s) => parse_str(s.trim()),
        Value::Number(n) => n
            .as_f64()
            .and_then(from_unix)
            .ok_or(FieldErrorKind::NotADateTime),
        _ => Err(FieldErrorKind::NotADateTime),
    }
}

fn parse_str(s: &str) -> Result<NaiveDateTime, FieldErrorKind> {
    if let Ok(number) = s.parse::<f64>() {
        return from_unix(number).ok_or(FieldErrorKind::NotADateTime);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or(FieldErrorKind::NotADateTime)
}

fn from_unix(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }

    let seconds = if value.abs() > MS_WATERSHED {
        value / 1000.0
    } else {
        value
    };

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)).map(|dt| dt.naive_utc())
}
