//! Domain error types.
//!
//! Only run-level failures live here. Per-field and per-file decode problems
//! never become errors; they resolve to `None` and default at the call site.

/// Top-level error type for the normalizer.
#[derive(Debug, thiserror::Error)]
pub enum NormalizerError {
    #[error("raw file not found: {path}")]
    InputNotFound { path: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&NormalizerError> for std::process::ExitCode {
    fn from(err: &NormalizerError) -> Self {
        let code: u8 = match err {
            NormalizerError::InputNotFound { .. }
            | NormalizerError::Serialize(_)
            | NormalizerError::Io(_) => 1,
            NormalizerError::ConfigParse { .. } => 2,
        };
        std::process::ExitCode::from(code)
    }
}
