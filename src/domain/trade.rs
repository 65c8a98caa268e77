//! Raw trade field resolution and the canonical trade record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::{as_f64, first_f64, first_match, round_to};
use super::timestamp::resolve_timestamp;

const OPEN_TIME_KEYS: [&str; 3] = ["open_date_utc", "open_timestamp", "open_date"];
const CLOSE_TIME_KEYS: [&str; 3] = ["close_date_utc", "close_timestamp", "close_date"];
const DURATION_KEYS: [&str; 2] = ["duration", "trade_duration"];
const PROFIT_ABS_KEYS: [&str; 2] = ["profit_abs", "profit_amount"];
const PROFIT_RATIO_KEYS: [&str; 2] = ["profit_ratio", "profit_pct"];
const OPEN_RATE_KEYS: [&str; 2] = ["open_rate", "open_price"];
const CLOSE_RATE_KEYS: [&str; 2] = ["close_rate", "close_price"];
const PAIR_KEYS: [&str; 2] = ["pair", "pair_id"];

/// One trade entry as exported by the engine, with no fixed schema.
///
/// Non-object entries become an empty record so they still count as trades.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrade {
    fields: Map<String, Value>,
}

impl From<Value> for RawTrade {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => RawTrade { fields },
            _ => RawTrade::default(),
        }
    }
}

impl RawTrade {
    /// Open time in Unix seconds, or `None` when no candidate resolves.
    pub fn open_time(&self) -> Option<i64> {
        first_match(&self.fields, &OPEN_TIME_KEYS, resolve_timestamp)
    }

    /// Close time in Unix seconds, or `None` when no candidate resolves.
    pub fn close_time(&self) -> Option<i64> {
        first_match(&self.fields, &CLOSE_TIME_KEYS, resolve_timestamp)
    }

    /// Explicit duration (minutes) or one derived from the resolved times.
    pub fn duration_minutes(&self) -> Option<f64> {
        let explicit = DURATION_KEYS
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .filter(|value| !value.is_null())
            .find_map(as_f64);
        if explicit.is_some() {
            return explicit;
        }
        match (self.open_time(), self.close_time()) {
            (Some(open), Some(close)) if open != 0 && close != 0 => {
                Some((close - open) as f64 / 60.0)
            }
            _ => None,
        }
    }

    pub fn profit_abs(&self) -> Option<f64> {
        first_f64(&self.fields, &PROFIT_ABS_KEYS)
    }

    pub fn profit_ratio(&self) -> Option<f64> {
        first_f64(&self.fields, &PROFIT_RATIO_KEYS)
    }

    pub fn open_rate(&self) -> Option<f64> {
        first_f64(&self.fields, &OPEN_RATE_KEYS)
    }

    pub fn close_rate(&self) -> Option<f64> {
        first_f64(&self.fields, &CLOSE_RATE_KEYS)
    }

    pub fn pair(&self) -> Option<String> {
        first_match(&self.fields, &PAIR_KEYS, |value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

/// Canonical trade record written to the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTrade {
    pub pair: String,
    pub open_time: i64,
    pub close_time: i64,
    pub open_rate: f64,
    pub close_rate: f64,
    pub profit_abs: f64,
    pub profit_ratio: f64,
    pub duration_minutes: f64,
    pub is_win: bool,
}

impl NormalizedTrade {
    /// Builds the canonical record, zero-defaulting anything unresolved.
    pub fn from_raw(raw: &RawTrade, fallback_pair: &str) -> Self {
        let profit_abs = raw.profit_abs().unwrap_or(0.0);
        NormalizedTrade {
            pair: raw.pair().unwrap_or_else(|| fallback_pair.to_string()),
            open_time: raw.open_time().unwrap_or(0),
            close_time: raw.close_time().unwrap_or(0),
            open_rate: raw.open_rate().unwrap_or(0.0),
            close_rate: raw.close_rate().unwrap_or(0.0),
            profit_abs: round_to(profit_abs, 4),
            profit_ratio: round_to(raw.profit_ratio().unwrap_or(0.0), 6),
            duration_minutes: round_to(raw.duration_minutes().unwrap_or(0.0), 1),
            is_win: profit_abs > 0.0,
        }
    }
}
