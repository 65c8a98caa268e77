#![allow(dead_code)]

use backtest_normalizer::domain::error::NormalizerError;
use backtest_normalizer::domain::ohlcv::Candle;
use backtest_normalizer::domain::report::Report;
use backtest_normalizer::ports::candle_port::CandlePort;
use backtest_normalizer::ports::report_port::ReportPort;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct MockCandlePort {
    pub data: HashMap<String, Vec<Candle>>,
    pub requests: RefCell<Vec<(String, String)>>,
}

impl MockCandlePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_candles(mut self, pair: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(pair.to_string(), candles);
        self
    }
}

impl CandlePort for MockCandlePort {
    fn load_candles(&self, pair: &str, timeframe: &str) -> Vec<Candle> {
        self.requests
            .borrow_mut()
            .push((pair.to_string(), timeframe.to_string()));
        self.data.get(pair).cloned().unwrap_or_default()
    }
}

/// Captures reports in memory instead of writing files.
pub struct CapturingReportPort {
    pub written: RefCell<Vec<(Report, PathBuf)>>,
}

impl CapturingReportPort {
    pub fn new() -> Self {
        Self {
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Report {
        self.written
            .borrow()
            .last()
            .map(|(report, _)| report.clone())
            .expect("no report written")
    }
}

impl ReportPort for CapturingReportPort {
    fn write(&self, report: &Report, output_path: &Path) -> Result<(), NormalizerError> {
        self.written
            .borrow_mut()
            .push((report.clone(), output_path.to_path_buf()));
        Ok(())
    }
}

pub fn make_candle(time: i64, close: f64) -> Candle {
    Candle {
        time,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 10.0,
    }
}

/// The canonical ISO-dated winning trade.
pub fn iso_trade() -> Value {
    json!({
        "pair": "BTC/USDT",
        "open_date_utc": "2024-01-01T00:00:00Z",
        "close_date_utc": "2024-01-01T01:00:00Z",
        "profit_abs": 50.0,
        "profit_ratio": 0.005
    })
}

pub fn epoch_trade(pair: &str, open: i64, close: i64, profit_abs: f64, profit_ratio: f64) -> Value {
    json!({
        "pair": pair,
        "open_timestamp": open,
        "close_timestamp": close,
        "profit_abs": profit_abs,
        "profit_ratio": profit_ratio
    })
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
