//! OHLCV candle representation and tolerant row decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::{as_f64, is_present};
use super::timestamp::resolve_timestamp;

/// One chart candle with its time in Unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Decodes an object row or a positional `[time, o, h, l, c, v]` row.
    ///
    /// Returns `None` for rows of any other shape; missing or non-numeric
    /// prices default to zero.
    pub fn from_row(row: &Value) -> Option<Candle> {
        match row {
            Value::Object(fields) => Some(Self::from_named(fields)),
            Value::Array(items) if items.len() >= 6 => Some(Candle {
                time: resolve_timestamp(&items[0]).unwrap_or(0),
                open: as_f64(&items[1]).unwrap_or(0.0),
                high: as_f64(&items[2]).unwrap_or(0.0),
                low: as_f64(&items[3]).unwrap_or(0.0),
                close: as_f64(&items[4]).unwrap_or(0.0),
                volume: as_f64(&items[5]).unwrap_or(0.0),
            }),
            _ => None,
        }
    }

    fn from_named(fields: &Map<String, Value>) -> Candle {
        let price = |key: &str| fields.get(key).and_then(as_f64).unwrap_or(0.0);
        let time = ["date", "time"]
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|value| is_present(value))
            .and_then(resolve_timestamp)
            .unwrap_or(0);
        Candle {
            time,
            open: price("open"),
            high: price("high"),
            low: price("low"),
            close: price("close"),
            volume: price("volume"),
        }
    }
}

/// Decodes a candle body: a row array, or an object wrapping one under `data`.
///
/// Returns `None` when the body has neither shape.
pub fn parse_candles(body: &Value) -> Option<Vec<Candle>> {
    let rows = match body {
        Value::Array(rows) => rows,
        Value::Object(object) => match object.get("data") {
            Some(Value::Array(rows)) => rows,
            _ => return None,
        },
        _ => return None,
    };
    Some(rows.iter().filter_map(Candle::from_row).collect())
}
