//! Equity curve construction from closed trades.

use serde::{Deserialize, Serialize};

use super::field::round_to;
use super::trade::RawTrade;

pub const DEFAULT_STARTING_BALANCE: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub time: i64,
    pub value: f64,
}

impl EquityPoint {
    fn new(time: i64, value: f64) -> Self {
        EquityPoint { time, value }
    }
}

/// Builds the balance series from raw trades; never returns an empty series.
///
/// Trades without a close time are ignored. The rest are ordered by close time
/// (stable for ties) and preceded by a seed point at the first trade's open
/// time holding `starting_balance`.
pub fn build_equity_curve(trades: &[RawTrade], starting_balance: f64) -> Vec<EquityPoint> {
    let mut closed: Vec<(i64, &RawTrade)> = trades
        .iter()
        .filter_map(|trade| {
            trade
                .close_time()
                .filter(|&close| close != 0)
                .map(|close| (close, trade))
        })
        .collect();
    closed.sort_by_key(|(close, _)| *close);

    let Some(&(first_close, first_trade)) = closed.first() else {
        let time = trades
            .first()
            .and_then(RawTrade::open_time)
            .unwrap_or(0);
        return vec![EquityPoint::new(time, starting_balance)];
    };

    let seed_time = first_trade
        .open_time()
        .filter(|&open| open != 0)
        .unwrap_or(first_close);

    let mut curve = Vec::with_capacity(closed.len() + 1);
    curve.push(EquityPoint::new(seed_time, starting_balance));

    let mut cumulative = 0.0_f64;
    for (close, trade) in closed {
        cumulative += trade.profit_abs().unwrap_or(0.0);
        curve.push(EquityPoint::new(close, round_to(starting_balance + cumulative, 2)));
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn trade(open: i64, close: i64, profit: f64) -> RawTrade {
        RawTrade::from(json!({
            "open_timestamp": open,
            "close_timestamp": close,
            "profit_abs": profit
        }))
    }

    #[test]
    fn empty_trades_single_point_at_zero() {
        let curve = build_equity_curve(&[], DEFAULT_STARTING_BALANCE);
        assert_eq!(curve, vec![EquityPoint::new(0, 10_000.0)]);
    }

    #[test]
    fn no_close_times_single_point_at_first_open() {
        let trades = vec![RawTrade::from(json!({"open_timestamp": 1_700_000_000}))];
        let curve = build_equity_curve(&trades, 500.0);
        assert_eq!(curve, vec![EquityPoint::new(1_700_000_000, 500.0)]);
    }

    #[test]
    fn no_times_at_all_single_point_at_zero() {
        let trades = vec![RawTrade::from(json!({"profit_abs": 5.0}))];
        let curve = build_equity_curve(&trades, 500.0);
        assert_eq!(curve, vec![EquityPoint::new(0, 500.0)]);
    }

    #[test]
    fn seed_then_cumulative_points_sorted_by_close() {
        let trades = vec![
            trade(1_700_000_600, 1_700_003_000, -25.0),
            trade(1_700_000_000, 1_700_001_000, 100.0),
            trade(1_700_002_000, 1_700_004_000, 10.556),
        ];
        let curve = build_equity_curve(&trades, 10_000.0);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0], EquityPoint::new(1_700_000_000, 10_000.0));
        assert_eq!(curve[1].time, 1_700_001_000);
        assert_abs_diff_eq!(curve[1].value, 10_100.0);
        assert_eq!(curve[2].time, 1_700_003_000);
        assert_abs_diff_eq!(curve[2].value, 10_075.0);
        assert_eq!(curve[3].time, 1_700_004_000);
        assert_abs_diff_eq!(curve[3].value, 10_085.56, epsilon = 1e-9);
    }

    #[test]
    fn seed_uses_close_time_when_open_unknown() {
        let trades = vec![RawTrade::from(json!({
            "close_timestamp": 1_700_001_000,
            "profit_abs": 1.0
        }))];
        let curve = build_equity_curve(&trades, 100.0);
        assert_eq!(curve[0], EquityPoint::new(1_700_001_000, 100.0));
        assert_eq!(curve[1], EquityPoint::new(1_700_001_000, 101.0));
    }

    #[test]
    fn equal_close_times_keep_input_order() {
        let trades = vec![
            trade(1_700_000_000, 1_700_001_000, 5.0),
            trade(1_700_000_100, 1_700_001_000, -3.0),
        ];
        let curve = build_equity_curve(&trades, 100.0);
        assert_abs_diff_eq!(curve[1].value, 105.0);
        assert_abs_diff_eq!(curve[2].value, 102.0);
    }

    #[test]
    fn unclosed_trades_are_excluded_from_curve() {
        let trades = vec![
            trade(1_700_000_000, 1_700_001_000, 5.0),
            RawTrade::from(json!({"open_timestamp": 1_700_000_500, "profit_abs": 1000.0})),
        ];
        let curve = build_equity_curve(&trades, 100.0);
        assert_eq!(curve.len(), 2);
        assert_abs_diff_eq!(curve[1].value, 105.0);
    }

    #[test]
    fn final_value_is_start_plus_total_profit() {
        let profits = [12.5, 40.0, 7.25, 0.5];
        let trades: Vec<RawTrade> = profits
            .iter()
            .enumerate()
            .map(|(i, &p)| trade(1_700_000_000 + i as i64 * 60, 1_700_000_030 + i as i64 * 60, p))
            .collect();
        let curve = build_equity_curve(&trades, 10_000.0);
        assert!(curve.windows(2).all(|w| w[0].time <= w[1].time));
        assert!(curve.windows(2).all(|w| w[0].value <= w[1].value));
        let last = curve.last().expect("non-empty");
        assert_abs_diff_eq!(last.value, 10_000.0 + profits.iter().sum::<f64>(), epsilon = 1e-9);
    }
}
