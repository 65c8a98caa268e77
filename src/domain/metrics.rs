//! Summary performance metrics for the report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::equity::EquityPoint;
use super::field::{as_f64, round_to};
use super::trade::NormalizedTrade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_trades: usize,
    pub win_rate: f64,
    pub profit_percent: f64,
    pub max_drawdown_percent: f64,
    /// Always serialized, currently always `null`.
    pub profit_factor: Option<f64>,
    /// Always serialized, currently always `null`.
    pub sharpe_ratio: Option<f64>,
    pub avg_trade_duration_minutes: Option<f64>,
}

impl Metrics {
    /// Aggregates trades and the equity series.
    ///
    /// `backtest_stats` is the engine's own summary block; its `profit_total`
    /// replaces the summed trade ratios when the block also reports
    /// `max_drawdown`.
    pub fn compute(
        trades: &[NormalizedTrade],
        equity_curve: &[EquityPoint],
        backtest_stats: Option<&Map<String, Value>>,
    ) -> Self {
        let total_trades = trades.len();
        let wins = trades.iter().filter(|t| t.is_win).count();

        let win_rate = if total_trades > 0 {
            wins as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let summed_ratio: f64 = trades.iter().map(|t| t.profit_ratio).sum();
        let profit_percent = backtest_stats
            .and_then(reported_profit_total)
            .unwrap_or(summed_ratio);

        let avg_trade_duration_minutes = if total_trades > 0 {
            let total: f64 = trades.iter().map(|t| t.duration_minutes).sum();
            Some(round_to(total / total_trades as f64, 1))
        } else {
            None
        };

        Metrics {
            total_trades,
            win_rate: round_to(win_rate, 2),
            profit_percent: round_to(profit_percent, 4),
            max_drawdown_percent: round_to(compute_max_drawdown(equity_curve), 2),
            profit_factor: None,
            sharpe_ratio: None,
            avg_trade_duration_minutes,
        }
    }
}

fn reported_profit_total(stats: &Map<String, Value>) -> Option<f64> {
    if !stats.contains_key("max_drawdown") {
        return None;
    }
    stats.get("profit_total").and_then(as_f64)
}

/// Largest peak-to-trough decline over the series, in percent.
///
/// The walk covers every point, the leading seed point included.
pub fn compute_max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let mut peak = equity_curve[0].value;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.value > peak {
            peak = point.value;
        }
        let dd = if peak != 0.0 {
            (peak - point.value) / peak * 100.0
        } else {
            0.0
        };
        if dd > max_dd {
            max_dd = dd;
        }
    }

    max_dd
}
