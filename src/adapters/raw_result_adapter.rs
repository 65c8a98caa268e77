//! Raw backtest result loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::domain::error::NormalizerError;

/// Reads the raw result file.
///
/// A missing file is the only failure. A file that exists but does not parse
/// as JSON degrades to `Value::Null`, which carries no trades.
pub fn load_raw_result(path: &Path) -> Result<Value, NormalizerError> {
    if !path.is_file() {
        return Err(NormalizerError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let parsed: Result<Value, serde_json::Error> = File::open(path)
        .map_err(serde_json::Error::io)
        .and_then(|file| serde_json::from_reader(BufReader::new(file)));

    match parsed {
        Ok(raw) => Ok(raw),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "raw result unreadable, treating as empty");
            Ok(Value::Null)
        }
    }
}
