//! Historical candle source port.

use crate::domain::ohlcv::Candle;

pub trait CandlePort {
    /// Candles for `pair` at `timeframe`, oldest first as stored.
    ///
    /// Unavailable or unreadable data yields an empty series, never an error.
    fn load_candles(&self, pair: &str, timeframe: &str) -> Vec<Candle>;
}
