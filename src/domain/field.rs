//! Ordered key probing over loosely shaped JSON objects.
//!
//! Each field role has a fixed list of candidate keys. Candidates are tried in
//! order with a typed accessor and the first one that yields a value wins.

use serde_json::{Map, Value};

/// A value counts as present when it is non-null and not "empty".
///
/// Empty covers `""`, numeric zero and `false`, matching how upstream engines
/// leave unused slots in their exports.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a float from a JSON number or a numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Returns the first candidate key whose present value the accessor accepts.
pub fn first_match<T>(
    object: &Map<String, Value>,
    keys: &[&str],
    accessor: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter(|value| is_present(value))
        .find_map(accessor)
}

/// Numeric field lookup: first present numeric candidate.
pub fn first_f64(object: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    first_match(object, keys, as_f64)
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Normalizes -0.0 so serialized output never shows a negative zero.
    if rounded == 0.0 { 0.0 } else { rounded }
}
