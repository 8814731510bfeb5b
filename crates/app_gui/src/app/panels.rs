//! Layout of the analysis form: header, upload panel, results panel and the
//! information section.

use super::{TexturePreviewStore, UiAction};
use ctscan_core::{InfoSection, ViewModel, copy};
use eframe::egui;

const PREVIEW_HEIGHT: f32 = 256.0;

fn card() -> egui::Frame {
    egui::Frame::new()
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(220)))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
}

fn tinted(fill: egui::Color32, border: egui::Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, border))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(12))
}

pub(super) fn render_header(ctx: &egui::Context) {
    egui::TopBottomPanel::top("header")
        .frame(
            egui::Frame::new()
                .fill(egui::Color32::BLACK)
                .inner_margin(egui::Margin::symmetric(24, 20)),
        )
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(copy::PAGE_TITLE)
                    .heading()
                    .strong()
                    .color(egui::Color32::WHITE),
            );
            ui.add_space(8.0);
            ui.label(egui::RichText::new(copy::PAGE_INTRO).color(egui::Color32::from_gray(200)));
        });
}

pub(super) fn render_upload_panel(
    ui: &mut egui::Ui,
    view: &ViewModel<'_>,
    actions: &mut Vec<UiAction>,
) {
    card().show(ui, |ui| {
        ui.heading(copy::UPLOAD_TITLE);
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_enabled(view.picker_enabled, egui::Button::new("Choose image..."))
                .clicked()
            {
                actions.push(UiAction::PickFile);
            }
            if let Some(selected) = &view.selected_label {
                ui.add_space(4.0);
                ui.weak(selected);
            }
        });
        ui.add_space(12.0);
        let submit = egui::Button::new(view.submit_label)
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(view.submit_enabled, submit).clicked() {
            actions.push(UiAction::Submit);
        }

        if let Some(error) = view.error {
            ui.add_space(12.0);
            tinted(
                egui::Color32::from_rgb(254, 242, 242),
                egui::Color32::from_rgb(254, 202, 202),
            )
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(egui::Color32::from_rgb(185, 28, 28), error.to_string());
            });
        }
    });
}

pub(super) fn render_results_panel(
    ui: &mut egui::Ui,
    view: &ViewModel<'_>,
    store: &TexturePreviewStore,
) {
    card().show(ui, |ui| {
        ui.heading(copy::RESULTS_TITLE);
        ui.add_space(12.0);

        if let Some(handle) = view.preview {
            match store.texture(handle) {
                Some(texture) => {
                    ui.add(
                        egui::Image::new(texture)
                            .max_height(PREVIEW_HEIGHT)
                            .max_width(ui.available_width())
                            .maintain_aspect_ratio(true),
                    );
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), PREVIEW_HEIGHT),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(rect, 4.0, egui::Color32::from_gray(40));
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        copy::PREVIEW_UNAVAILABLE,
                        egui::FontId::proportional(14.0),
                        egui::Color32::from_gray(180),
                    );
                }
            }
            ui.add_space(12.0);
        }

        if let Some(result) = &view.result {
            let green = egui::Color32::from_rgb(21, 128, 61);
            tinted(
                egui::Color32::from_rgb(240, 253, 244),
                egui::Color32::from_rgb(187, 247, 208),
            )
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(result.heading).strong().size(16.0).color(green));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Prediction:").strong().color(green));
                    ui.colored_label(green, result.label);
                });
                ui.colored_label(green, format!("File: {}", result.analyzed_file));
                ui.add_space(4.0);
                ui.label(egui::RichText::new(result.disclaimer).small().color(green));
            });
        }

        if view.show_placeholder {
            ui.add_space(48.0);
            ui.vertical_centered(|ui| ui.weak(copy::PLACEHOLDER));
            ui.add_space(48.0);
        }
    });
}

pub(super) fn render_info_section(ui: &mut egui::Ui) {
    card().show(ui, |ui| {
        ui.columns(InfoSection::ALL.len(), |cols| {
            for (col, section) in cols.iter_mut().zip(InfoSection::ALL) {
                col.label(egui::RichText::new(section.title).strong());
                col.add_space(4.0);
                col.weak(section.body);
            }
        });
    });
}
