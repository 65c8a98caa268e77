//! Epoch timestamp resolution for mixed encodings.
//!
//! Upstream exports mix whole seconds, milliseconds and ISO-8601 strings. All
//! of them resolve to Unix seconds here; anything unreadable is `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Numeric epochs above this magnitude are milliseconds.
pub const MILLIS_THRESHOLD: f64 = 1e10;

/// Extended and basic ISO-8601 date-time layouts, with or without seconds.
const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Converts a numeric epoch in seconds or milliseconds to Unix seconds.
pub fn epoch_seconds(raw: f64) -> i64 {
    if raw > MILLIS_THRESHOLD {
        (raw as i64).div_euclid(1000)
    } else {
        raw as i64
    }
}

fn integer_epoch_seconds(raw: i64) -> i64 {
    if raw as f64 > MILLIS_THRESHOLD {
        raw.div_euclid(1000)
    } else {
        raw
    }
}

/// Parses an ISO-8601 date or date-time to Unix seconds.
///
/// Offsets (including a trailing `Z`) are honoured; offset-less values are
/// read as UTC and a bare date is midnight UTC.
pub fn parse_iso8601(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }
    // `%#z` takes `Z`, `+HH`, `+HHMM` and `+HH:MM`.
    let with_offset = DATE_TIME_FORMATS.iter().find_map(|fmt| {
        DateTime::parse_from_str(text, &format!("{fmt}%#z"))
            .ok()
            .map(|dt| dt.timestamp())
    });
    if with_offset.is_some() {
        return with_offset;
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc().timestamp())
}

/// Resolves a JSON value holding a timestamp in any supported encoding.
pub fn resolve_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(integer_epoch_seconds(i)),
            None => n.as_f64().filter(|v| v.is_finite()).map(epoch_seconds),
        },
        Value::String(s) => parse_iso8601(s),
        _ => None,
    }
}
