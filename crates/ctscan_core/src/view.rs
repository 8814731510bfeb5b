//! Rendering projection: what the form shows for a given controller state.

use crate::controller::UploadController;
use crate::error::UserError;
use crate::preview::{PreviewHandle, PreviewStore};

/// Fixed copy of the analysis form.
pub mod copy {
    pub const PAGE_TITLE: &str = "Lung Cancer CT Scan Analysis";
    pub const PAGE_INTRO: &str = "Upload CT scan images for instant analysis. Our advanced AI model helps detect potential lung abnormalities, supporting early diagnosis and treatment planning.";
    pub const UPLOAD_TITLE: &str = "Upload CT Scan";
    pub const RESULTS_TITLE: &str = "Preview & Results";
    pub const SUBMIT_IDLE: &str = "Analyze CT Scan";
    pub const SUBMIT_BUSY: &str = "Processing...";
    pub const RESULT_HEADING: &str = "Analysis Complete";
    pub const RESULT_DISCLAIMER: &str = "This analysis is based on our AI model's interpretation of the CT scan. Please consult with a healthcare professional for medical advice.";
    pub const PLACEHOLDER: &str = "Upload a CT scan to see the preview and analysis results here";
    pub const PREVIEW_UNAVAILABLE: &str = "Preview unavailable";
}

/// One column of the information section under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoSection {
    pub title: &'static str,
    pub body: &'static str,
}

impl InfoSection {
    pub const ALL: [InfoSection; 3] = [
        InfoSection {
            title: "About the Analysis",
            body: "Our AI model analyzes CT scan images to detect potential indicators of lung cancer and other respiratory conditions.",
        },
        InfoSection {
            title: "Supported File Types",
            body: "We support common medical imaging formats including DICOM, JPEG, and PNG files of CT scans.",
        },
        InfoSection {
            title: "Important Note",
            body: "This tool is for preliminary analysis only. Always consult with healthcare professionals for medical diagnosis.",
        },
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel<'a> {
    pub heading: &'static str,
    pub label: &'a str,
    pub analyzed_file: &'a str,
    pub disclaimer: &'static str,
}

/// Everything a front end needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel<'a> {
    pub preview: Option<&'a PreviewHandle>,
    pub result: Option<ResultPanel<'a>>,
    /// Shown when there is neither a preview nor a result.
    pub show_placeholder: bool,
    /// Independent of the panels above.
    pub error: Option<UserError>,
    pub selected_label: Option<String>,
    pub picker_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

impl<S: PreviewStore> UploadController<S> {
    pub fn view(&self) -> ViewModel<'_> {
        let loading = self.is_loading();
        let result = self.result.as_ref().map(|r| ResultPanel {
            heading: copy::RESULT_HEADING,
            label: &r.label,
            analyzed_file: &r.analyzed_file,
            disclaimer: copy::RESULT_DISCLAIMER,
        });
        ViewModel {
            preview: self.preview.as_ref(),
            show_placeholder: self.preview.is_none() && result.is_none(),
            result,
            error: self.error,
            selected_label: self
                .selected
                .as_ref()
                .map(|f| format!("Selected: {}", f.name)),
            picker_enabled: !loading,
            submit_enabled: self.selected.is_some() && !loading,
            submit_label: if loading {
                copy::SUBMIT_BUSY
            } else {
                copy::SUBMIT_IDLE
            },
        }
    }
}
