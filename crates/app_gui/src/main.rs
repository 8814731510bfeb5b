mod app;

use app::UiApp;
use ctscan_core::{AppConfig, HttpPredictionClient};
use eframe::{NativeOptions, egui};

fn main() {
    tracing_subscriber::fmt::init();

    let config = match app::load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid configuration, using defaults: {e:#}");
            AppConfig::default()
        }
    };
    let client = match HttpPredictionClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Cannot create prediction client: {e}");
            return;
        }
    };
    tracing::info!(endpoint = %client.endpoint(), "starting CT scan client");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 780.0]),
        ..NativeOptions::default()
    };
    if let Err(e) = eframe::run_native(
        "CT Scan Analysis",
        options,
        Box::new(move |cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(
                &cc.egui_ctx,
                client,
                &config,
            )))
        }),
    ) {
        eprintln!("Application stopped with error: {e}");
    }
}
