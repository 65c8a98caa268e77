//! File-backed implementations of the ports.

pub mod file_config_adapter;
pub mod json_candle_adapter;
pub mod json_report_adapter;
pub mod raw_result_adapter;
