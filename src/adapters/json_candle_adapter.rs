//! Candle files from an exchange data directory.
//!
//! Layout: `<data_dir>/<exchange>/<BASE_QUOTE>-<timeframe>.json`, with a
//! gzip-compressed `.json.gz` variant tried second.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde_json::Value;

use crate::domain::ohlcv::{parse_candles, Candle};
use crate::domain::report::EXCHANGE_DATA_SOURCE;
use crate::ports::candle_port::CandlePort;

const EXTENSIONS: [&str; 2] = [".json", ".json.gz"];

pub struct JsonCandleAdapter {
    data_dir: PathBuf,
    exchange: String,
}

impl JsonCandleAdapter {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            exchange: EXCHANGE_DATA_SOURCE.to_string(),
        }
    }

    fn base_name(pair: &str, timeframe: &str) -> String {
        format!("{}-{}", pair.replace('/', "_"), timeframe)
    }

    fn candidate_paths(&self, pair: &str, timeframe: &str) -> Vec<PathBuf> {
        let dir = self.data_dir.join(&self.exchange);
        let base = Self::base_name(pair, timeframe);
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{base}{ext}")))
            .collect()
    }

    fn read_body(path: &Path) -> std::io::Result<Value> {
        let file = BufReader::new(File::open(path)?);
        let reader: Box<dyn Read> = if path.to_string_lossy().ends_with(".gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(serde_json::from_reader(reader)?)
    }
}

impl CandlePort for JsonCandleAdapter {
    fn load_candles(&self, pair: &str, timeframe: &str) -> Vec<Candle> {
        if !self.data_dir.is_dir() {
            tracing::debug!(dir = %self.data_dir.display(), "candle directory absent, skipping");
            return Vec::new();
        }

        for path in self.candidate_paths(pair, timeframe) {
            if !path.is_file() {
                continue;
            }
            let body = match Self::read_body(&path) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable candle file");
                    return Vec::new();
                }
            };
            if let Some(candles) = parse_candles(&body) {
                tracing::debug!(path = %path.display(), count = candles.len(), "loaded candles");
                return candles;
            }
            tracing::debug!(path = %path.display(), "candle file has no row array");
        }

        Vec::new()
    }
}
