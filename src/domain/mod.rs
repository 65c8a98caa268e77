//! Core domain types and normalization logic.

pub mod field;
pub mod timestamp;
pub mod extract;
pub mod trade;
pub mod ohlcv;
pub mod equity;
pub mod metrics;
pub mod report;
pub mod error;
