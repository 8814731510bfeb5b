use crate::config::AppConfig;
use crate::error::PredictError;
use crate::{Prediction, PredictionRequest, UPLOAD_FIELD};
use reqwest::Url;
use reqwest::blocking::{Client, multipart};
use std::time::Duration;

/// Something that turns an uploaded file into a class label.
pub trait PredictionService {
    fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError>;
}

/// Posts the file as multipart form data to the prediction endpoint.
///
/// No timeout and no retries: a request runs until the server or the
/// connection gives up.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    endpoint: Url,
}

impl HttpPredictionClient {
    pub fn new(endpoint: &str) -> Result<Self, PredictError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PredictError::InvalidRequest(format!("endpoint `{endpoint}`: {e}")))?;
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Self::with_client(client, endpoint)
    }

    /// Uses a preconfigured `reqwest` client, e.g. one with proxy settings.
    pub fn with_client(client: Client, endpoint: Url) -> Result<Self, PredictError> {
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(PredictError::InvalidRequest(format!(
                "endpoint `{endpoint}` is not http(s)"
            )));
        }
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PredictError> {
        Self::new(&config.endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        let file = &request.file;
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| PredictError::InvalidRequest(format!("mime `{}`: {e}", file.mime)))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(
            endpoint = %self.endpoint,
            file = %file.name,
            size = file.bytes.len(),
            "posting prediction request"
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Status(status.as_u16()));
        }
        let body = response.bytes()?;
        parse_prediction(&body)
    }
}

/// Decodes a 2xx response body. A blank label counts as no label.
pub fn parse_prediction(body: &[u8]) -> Result<Prediction, PredictError> {
    let prediction: Prediction =
        serde_json::from_slice(body).map_err(|e| PredictError::Malformed(e.to_string()))?;
    if prediction.predicted_class.trim().is_empty() {
        return Err(PredictError::Malformed("empty predicted_class".into()));
    }
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_label_and_ignores_extra_fields() {
        let prediction =
            parse_prediction(br#"{"predicted_class": "malignant", "confidence": 0.93}"#).unwrap();
        assert_eq!(prediction.predicted_class, "malignant");
    }

    #[rstest]
    #[case::not_json(&b"<html>oops</html>"[..])]
    #[case::missing_field(&br#"{"label": "malignant"}"#[..])]
    #[case::wrong_type(&br#"{"predicted_class": 3}"#[..])]
    #[case::empty(&b""[..])]
    #[case::empty_label(&br#"{"predicted_class": ""}"#[..])]
    #[case::blank_label(&br#"{"predicted_class": "   "}"#[..])]
    fn rejects_malformed_bodies(#[case] body: &[u8]) {
        assert!(matches!(
            parse_prediction(body),
            Err(PredictError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        assert!(matches!(
            HttpPredictionClient::new("not a url"),
            Err(PredictError::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        assert!(matches!(
            HttpPredictionClient::new("file:///tmp/predict"),
            Err(PredictError::InvalidRequest(_))
        ));
    }

    #[test]
    fn default_config_targets_local_predict_route() {
        let client = HttpPredictionClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.endpoint().as_str(), crate::DEFAULT_ENDPOINT);
    }
}
