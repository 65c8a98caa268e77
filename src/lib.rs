//! backtest-normalizer — turns raw backtest engine output into a canonical report.
//!
//! Hexagonal architecture: pure normalization logic in [`domain`], I/O seams in
//! [`ports`], file-backed implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
