//! Pretty-printed JSON report writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::error::NormalizerError;
use crate::domain::report::Report;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        JsonReportAdapter
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &Report, output_path: &Path) -> Result<(), NormalizerError> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(output_path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
        tracing::debug!(path = %output_path.display(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extract::RawParts;
    use crate::domain::report::ReportRequest;
    use serde_json::{json, Value};

    fn sample_report() -> Report {
        let parts = RawParts::from_raw(json!([{
            "pair": "BTC/USDT",
            "open_date_utc": "2024-01-01T00:00:00Z",
            "close_date_utc": "2024-01-01T01:00:00Z",
            "profit_abs": 50.0,
            "profit_ratio": 0.005
        }]), "EmaRsiTrend");
        let request = ReportRequest::new("EmaRsiTrend", "15m", "BTC/USDT", "20240101-20240201");
        Report::build(parts, &request, Vec::new())
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/report.json");
        JsonReportAdapter::new().write(&sample_report(), &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn output_is_pretty_with_fixed_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        JsonReportAdapter::new().write(&sample_report(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("{\n  \"strategy\": \"EmaRsiTrend\""));
        let order = [
            "\"strategy\"",
            "\"exchange_data_source\"",
            "\"timeframe\"",
            "\"pairs\"",
            "\"timerange\"",
            "\"metrics\"",
            "\"tv_ohlc\"",
            "\"tv_equity\"",
            "\"trades\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn written_report_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = sample_report();
        JsonReportAdapter::new().write(&report, &path).unwrap();

        let back: Report = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, report);

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metrics"]["profit_factor"], Value::Null);
        assert_eq!(value["trades"][0]["open_time"], json!(1_704_067_200));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = JsonReportAdapter::new()
            .write(&sample_report(), &blocker.join("report.json"))
            .unwrap_err();
        assert!(matches!(err, NormalizerError::Io(_)));
    }
}
