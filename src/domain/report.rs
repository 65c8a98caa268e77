//! Canonical report assembly.

use serde::{Deserialize, Serialize};

use super::equity::{build_equity_curve, EquityPoint, DEFAULT_STARTING_BALANCE};
use super::extract::RawParts;
use super::metrics::Metrics;
use super::ohlcv::{parse_candles, Candle};
use super::trade::NormalizedTrade;

/// Exchange whose candle layout the data directory follows.
pub const EXCHANGE_DATA_SOURCE: &str = "binance";

pub const DEFAULT_CHART_PAIR: &str = "BTC/USDT";

/// Run parameters that are passed through into the report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub strategy: String,
    pub timeframe: String,
    pub pairs: Vec<String>,
    pub timerange: String,
    pub starting_balance: f64,
    /// Pair preferred for the candle series when it is in `pairs`.
    pub preferred_chart_pair: String,
}

impl ReportRequest {
    pub fn new(strategy: &str, timeframe: &str, pairs: &str, timerange: &str) -> Self {
        ReportRequest {
            strategy: strategy.to_string(),
            timeframe: timeframe.to_string(),
            pairs: parse_pairs(pairs),
            timerange: timerange.to_string(),
            starting_balance: DEFAULT_STARTING_BALANCE,
            preferred_chart_pair: DEFAULT_CHART_PAIR.to_string(),
        }
    }

    /// The pair whose candles are charted and which unlabeled trades inherit.
    pub fn chart_pair(&self) -> String {
        if self.pairs.iter().any(|p| *p == self.preferred_chart_pair) {
            return self.preferred_chart_pair.clone();
        }
        self.pairs
            .first()
            .cloned()
            .unwrap_or_else(|| self.preferred_chart_pair.clone())
    }
}

/// Splits a comma-separated pair list, dropping blanks.
pub fn parse_pairs(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub strategy: String,
    pub exchange_data_source: String,
    pub timeframe: String,
    pub pairs: Vec<String>,
    pub timerange: String,
    pub metrics: Metrics,
    pub tv_ohlc: Vec<Candle>,
    pub tv_equity: Vec<EquityPoint>,
    pub trades: Vec<NormalizedTrade>,
}

impl Report {
    /// Runs the normalization stages over a split raw result.
    ///
    /// `candles` comes from the candle store; when it is empty the rows
    /// embedded in the raw result are used instead.
    pub fn build(parts: RawParts, request: &ReportRequest, candles: Vec<Candle>) -> Self {
        let chart_pair = request.chart_pair();

        let trades: Vec<NormalizedTrade> = parts
            .trades
            .iter()
            .map(|raw| NormalizedTrade::from_raw(raw, &chart_pair))
            .collect();

        let tv_equity = build_equity_curve(&parts.trades, request.starting_balance);
        let metrics = Metrics::compute(&trades, &tv_equity, parts.backtest_stats.as_ref());

        let tv_ohlc = if candles.is_empty() {
            parts
                .embedded_ohlcv
                .as_ref()
                .and_then(parse_candles)
                .unwrap_or_default()
        } else {
            candles
        };

        let pairs = if request.pairs.is_empty() {
            vec![chart_pair]
        } else {
            request.pairs.clone()
        };

        tracing::debug!(
            trades = trades.len(),
            candles = tv_ohlc.len(),
            equity_points = tv_equity.len(),
            "report assembled"
        );

        Report {
            strategy: request.strategy.clone(),
            exchange_data_source: EXCHANGE_DATA_SOURCE.to_string(),
            timeframe: request.timeframe.clone(),
            pairs,
            timerange: request.timerange.clone(),
            metrics,
            tv_ohlc,
            tv_equity,
            trades,
        }
    }
}
