//! Locating trades, embedded candles and reported stats in a raw result.

use serde_json::{Map, Value};

use super::trade::RawTrade;

/// The raw result split into the parts later stages consume.
#[derive(Debug, Clone, Default)]
pub struct RawParts {
    pub trades: Vec<RawTrade>,
    /// Candle rows embedded under an `ohlcv` key, if any.
    pub embedded_ohlcv: Option<Value>,
    /// The engine's own `backtest_stats` block, if any.
    pub backtest_stats: Option<Map<String, Value>>,
}

impl RawParts {
    /// Splits `raw`, taking trades for `strategy` when results are keyed by
    /// strategy name.
    pub fn from_raw(mut raw: Value, strategy: &str) -> Self {
        let (embedded_ohlcv, backtest_stats) = match raw.as_object_mut() {
            Some(object) => (
                object.remove("ohlcv"),
                match object.remove("backtest_stats") {
                    Some(Value::Object(stats)) => Some(stats),
                    _ => None,
                },
            ),
            None => (None, None),
        };
        let trades = extract_trades(raw, strategy)
            .into_iter()
            .map(RawTrade::from)
            .collect();
        RawParts {
            trades,
            embedded_ohlcv,
            backtest_stats,
        }
    }
}

/// Returns the list of trade entries inside a raw result.
///
/// A bare array is the trade list. An object yields its `trades` array, or
/// failing that the `trades` array under `strategy`: directly, under the
/// entry named `strategy_name`, or under the only entry when there is
/// exactly one. Anything else has no trades.
pub fn extract_trades(raw: Value, strategy_name: &str) -> Vec<Value> {
    match raw {
        Value::Array(trades) => trades,
        Value::Object(mut object) => {
            if let Some(trades) = object.remove("trades") {
                return into_array(trades);
            }
            match object.remove("strategy") {
                Some(Value::Object(strategies)) => trades_from_strategy_map(strategies, strategy_name),
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

fn trades_from_strategy_map(mut strategies: Map<String, Value>, strategy_name: &str) -> Vec<Value> {
    if let Some(trades) = strategies.remove("trades") {
        return into_array(trades);
    }
    let entry = match strategies.remove(strategy_name) {
        Some(entry) => entry,
        None if strategies.len() == 1 => match strategies.into_iter().next() {
            Some((_, entry)) => entry,
            None => return Vec::new(),
        },
        None => {
            tracing::warn!(
                strategy = strategy_name,
                available = strategies.len(),
                "strategy not found among per-strategy results"
            );
            return Vec::new();
        }
    };
    match entry {
        Value::Object(mut per_strategy) => per_strategy.remove("trades").map(into_array).unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn into_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
