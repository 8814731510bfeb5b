//! Runs prediction requests off the UI thread.

use crossbeam_channel::Sender;
use ctscan_core::{
    HttpPredictionClient, PredictError, Prediction, PredictionRequest, PredictionService,
};
use eframe::egui;
use std::thread;

pub(super) type PredictOutcome = Result<Prediction, PredictError>;

/// Posts `request` on a worker thread and reports back over `tx`.
///
/// The request is not cancellable; the outcome always arrives, even if the
/// user has moved on.
pub(super) fn spawn_prediction(
    client: HttpPredictionClient,
    request: PredictionRequest,
    tx: Sender<PredictOutcome>,
    ctx: egui::Context,
) -> Result<(), PredictError> {
    thread::Builder::new()
        .name("prediction".into())
        .spawn(move || {
            let outcome = client.predict(&request);
            if tx.send(outcome).is_err() {
                tracing::debug!("UI closed before prediction finished");
            }
            ctx.request_repaint();
        })
        .map(|_| ())
        .map_err(|e| PredictError::Worker(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctscan_core::{BlobRegistry, FileCandidate, SubmissionState, UploadController, UserError};
    use reqwest::Url;
    use reqwest::blocking::Client;
    use std::time::Duration;

    fn closed_port_client() -> HttpPredictionClient {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let endpoint = Url::parse(&format!("http://{addr}/predict/")).unwrap();
        let client = Client::builder().no_proxy().build().unwrap();
        HttpPredictionClient::with_client(client, endpoint).unwrap()
    }

    #[test]
    fn refused_request_comes_back_as_failure() {
        let mut controller = UploadController::new(BlobRegistry::new());
        controller.select_file(FileCandidate::new("scan.png", "image/png", vec![1u8, 2, 3]));
        let request = controller.begin_submit().unwrap();
        assert_eq!(controller.state(), SubmissionState::Loading);

        let (tx, rx) = crossbeam_channel::unbounded();
        spawn_prediction(closed_port_client(), request, tx, egui::Context::default()).unwrap();
        let outcome = rx.recv_timeout(Duration::from_secs(30)).unwrap();
        assert!(matches!(outcome, Err(PredictError::Transport(_))));

        controller.finish_submit(outcome);
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(controller.error(), Some(UserError::PredictionFailed));
        assert!(controller.result().is_none());
    }
}
