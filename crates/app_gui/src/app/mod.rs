//! Desktop window around the upload controller.

mod panels;
mod preview;
mod worker;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use ctscan_core::{AppConfig, HttpPredictionClient, UploadController};
use directories_next::ProjectDirs;
use eframe::{App, Frame, egui};
use rfd::FileDialog;

pub use preview::TexturePreviewStore;
use worker::PredictOutcome;

/// Extensions offered by the file picker. The controller re-checks the
/// declared MIME type of whatever comes back.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

const CONFIG_FILE: &str = "ctscan.toml";

/// Reads `ctscan.toml` from the platform config directory, if present.
pub fn load_config() -> Result<AppConfig> {
    let Some(dirs) = ProjectDirs::from("org", "ctscan", "CtScan") else {
        tracing::warn!("No home directory found; using default configuration");
        return Ok(AppConfig::default());
    };
    let path = dirs.config_dir().join(CONFIG_FILE);
    AppConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

/// Actions collected while drawing, applied once the frame's view is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiAction {
    PickFile,
    Submit,
}

pub struct UiApp {
    controller: UploadController<TexturePreviewStore>,
    client: HttpPredictionClient,
    outcome_tx: Sender<PredictOutcome>,
    outcome_rx: Receiver<PredictOutcome>,
    app_version: &'static str,
}

impl UiApp {
    pub fn new(ctx: &egui::Context, client: HttpPredictionClient, config: &AppConfig) -> Self {
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
        Self {
            controller: UploadController::new(TexturePreviewStore::new(
                ctx.clone(),
                config.preview_max_dimension,
            )),
            client,
            outcome_tx,
            outcome_rx,
            app_version: env!("CTSCAN_VERSION"),
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.controller.finish_submit(outcome);
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::PickFile => {
                if let Some(path) = FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .set_directory(".")
                    .pick_file()
                {
                    self.controller.select_path(path);
                }
            }
            UiAction::Submit => {
                if let Some(request) = self.controller.begin_submit()
                    && let Err(e) = worker::spawn_prediction(
                        self.client.clone(),
                        request,
                        self.outcome_tx.clone(),
                        ctx.clone(),
                    )
                {
                    self.controller.finish_submit(Err(e));
                }
            }
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_outcomes();

        let mut actions = Vec::new();
        {
            let view = self.controller.view();
            let store = self.controller.store();

            panels::render_header(ctx);
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("v{}", self.app_version));
                    ui.separator();
                    ui.label(format!("Endpoint: {}", self.client.endpoint()));
                    if self.controller.is_loading() {
                        ui.separator();
                        ui.spinner();
                    }
                });
            });
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.columns(2, |cols| {
                            panels::render_upload_panel(&mut cols[0], &view, &mut actions);
                            panels::render_results_panel(&mut cols[1], &view, store);
                        });
                        ui.add_space(16.0);
                        panels::render_info_section(ui);
                    });
            });
        }

        for action in actions {
            self.apply(ctx, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctscan_core::{is_image_mime, mime_for_path};

    #[test]
    fn picker_extensions_pass_mime_validation() {
        for ext in IMAGE_EXTENSIONS {
            let mime = mime_for_path(format!("scan.{ext}"));
            assert!(is_image_mime(&mime), "{ext} sniffed as {mime}");
        }
    }
}
