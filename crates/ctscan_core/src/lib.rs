//! Upload, preview and prediction state for the CT scan analysis client.
//!
//! The [`UploadController`] owns every state transition of the form: file
//! selection, preview handles, submission and the result/error panels. The
//! network side sits behind [`PredictionService`], with
//! [`HttpPredictionClient`] as the real multipart implementation.

mod client;
mod config;
mod controller;
mod error;
mod preview;
mod view;

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub use client::{HttpPredictionClient, PredictionService, parse_prediction};
pub use config::AppConfig;
pub use controller::{PredictionResult, Selection, SubmissionState, UploadController};
pub use error::{ConfigError, PredictError, UserError};
pub use preview::{BlobRegistry, PreviewHandle, PreviewStore};
pub use view::{InfoSection, ResultPanel, ViewModel, copy};

/// Endpoint the reference form posts to.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict/";

/// Multipart field name the prediction service reads the upload from.
pub const UPLOAD_FIELD: &str = "file";

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file the user picked, before or after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Display name, usually the file name without directories.
    pub name: String,
    /// Declared content type, e.g. `image/png`.
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk and declares its type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            mime: mime_for_path(path),
            bytes: bytes.into(),
        })
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

/// Declared MIME type for a path, sniffed from its extension.
pub fn mime_for_path(path: impl AsRef<Path>) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME)
        .to_string()
}

/// True when the declared type falls under `image/*`.
pub fn is_image_mime(mime: &str) -> bool {
    mime.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Snapshot of the selected file taken when a submission starts.
///
/// The request owns its bytes, so re-selecting a file afterwards cannot
/// change what is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub file: FileCandidate,
}

/// Successful response body of the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    pub predicted_class: String,
}
