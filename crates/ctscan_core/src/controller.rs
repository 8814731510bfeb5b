use crate::client::PredictionService;
use crate::error::{PredictError, UserError};
use crate::preview::{PreviewHandle, PreviewStore};
use crate::{FileCandidate, Prediction, PredictionRequest};
use std::path::Path;

/// Phase of the upload/predict flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Exactly one request is in flight.
    Loading,
}

/// What `select_file` did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Accepted,
    Rejected,
    /// A submission is in flight; selection is locked.
    Ignored,
}

/// Last successful classification and the file it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub label: String,
    pub analyzed_file: String,
}

/// Owns the form state and every transition on it.
pub struct UploadController<S: PreviewStore> {
    pub(crate) store: S,
    pub(crate) selected: Option<FileCandidate>,
    pub(crate) preview: Option<PreviewHandle>,
    pub(crate) state: SubmissionState,
    pub(crate) error: Option<UserError>,
    pub(crate) result: Option<PredictionResult>,
    in_flight: Option<String>,
}

impl<S: PreviewStore> UploadController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            selected: None,
            preview: None,
            state: SubmissionState::Idle,
            error: None,
            result: None,
            in_flight: None,
        }
    }

    /// Validates the candidate's declared type and swaps the selection.
    ///
    /// The previous preview handle is revoked on every accepted or rejected
    /// call. The prediction result is never touched here.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Selection {
        if self.is_loading() {
            tracing::debug!(file = %candidate.name, "selection ignored while loading");
            return Selection::Ignored;
        }
        self.release_preview();
        if !candidate.is_image() {
            tracing::warn!(
                file = %candidate.name,
                mime = %candidate.mime,
                "selection rejected: not an image"
            );
            self.reject_selection();
            return Selection::Rejected;
        }

        tracing::info!(
            file = %candidate.name,
            mime = %candidate.mime,
            size = candidate.bytes.len(),
            "selection accepted"
        );
        self.preview = Some(self.store.create(&candidate));
        self.selected = Some(candidate);
        self.error = None;
        Selection::Accepted
    }

    /// Reads `path` from disk and selects it. Unreadable files count as
    /// invalid.
    pub fn select_path(&mut self, path: impl AsRef<Path>) -> Selection {
        if self.is_loading() {
            return Selection::Ignored;
        }
        let path = path.as_ref();
        match FileCandidate::from_path(path) {
            Ok(candidate) => self.select_file(candidate),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                self.release_preview();
                self.reject_selection();
                Selection::Rejected
            }
        }
    }

    /// Moves to `Loading` and snapshots the selected file for upload.
    ///
    /// Returns `None` without starting anything when no file is selected
    /// (the missing-file error is set) or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<PredictionRequest> {
        if self.is_loading() {
            tracing::debug!("submission ignored: request already in flight");
            return None;
        }
        let Some(file) = self.selected.clone() else {
            self.error = Some(UserError::MissingFile);
            return None;
        };

        tracing::info!(file = %file.name, "submission started");
        self.state = SubmissionState::Loading;
        self.error = None;
        self.in_flight = Some(file.name.clone());
        Some(PredictionRequest { file })
    }

    /// Applies the outcome of the request started by `begin_submit` and
    /// returns to `Idle`.
    pub fn finish_submit(&mut self, outcome: Result<Prediction, PredictError>) {
        if !self.is_loading() {
            tracing::warn!("submission outcome arrived with no request in flight; dropped");
            return;
        }
        let analyzed_file = self.in_flight.take().unwrap_or_default();
        match outcome {
            Ok(prediction) => {
                tracing::info!(
                    file = %analyzed_file,
                    label = %prediction.predicted_class,
                    "submission finished"
                );
                self.result = Some(PredictionResult {
                    label: prediction.predicted_class,
                    analyzed_file,
                });
            }
            Err(e) => {
                tracing::warn!(file = %analyzed_file, "submission failed: {e}");
                self.error = Some(UserError::PredictionFailed);
            }
        }
        self.state = SubmissionState::Idle;
    }

    /// Runs a whole submission synchronously against `service`.
    pub fn submit<P: PredictionService + ?Sized>(&mut self, service: &P) {
        if let Some(request) = self.begin_submit() {
            let outcome = service.predict(&request);
            self.finish_submit(outcome);
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SubmissionState::Loading
    }

    pub fn error(&self) -> Option<UserError> {
        self.error
    }

    pub fn selected_file(&self) -> Option<&FileCandidate> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn reject_selection(&mut self) {
        self.error = Some(UserError::InvalidFile);
        self.selected = None;
    }

    fn release_preview(&mut self) {
        if let Some(handle) = self.preview.take() {
            self.store.revoke(handle);
        }
    }
}

impl<S: PreviewStore> Drop for UploadController<S> {
    fn drop(&mut self) {
        self.release_preview();
    }
}
