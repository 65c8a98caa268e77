//! Port traits at the I/O boundaries.

pub mod candle_port;
pub mod config_port;
pub mod report_port;
