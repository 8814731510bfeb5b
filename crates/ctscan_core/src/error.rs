use std::path::PathBuf;
use thiserror::Error;

/// Why a prediction call did not produce a label.
///
/// The variants are kept apart for logging; the user only ever sees
/// [`UserError::PredictionFailed`].
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("request to prediction service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service answered HTTP {0}")]
    Status(u16),
    #[error("malformed prediction response: {0}")]
    Malformed(String),
    #[error("cannot build upload: {0}")]
    InvalidRequest(String),
    #[error("prediction worker unavailable: {0}")]
    Worker(String),
}

/// Messages shown in the error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Please select a valid image file")]
    InvalidFile,
    #[error("Please select a file first")]
    MissingFile,
    #[error("Failed to get prediction. Please try again.")]
    PredictionFailed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("endpoint `{0}` is not an http(s) URL")]
    Endpoint(String),
    #[error("preview_max_dimension must be positive")]
    PreviewSize,
}
