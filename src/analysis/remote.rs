//! Client for an external `/predict/image` backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AnalysisError, CapturedImage, StressAnalyzer};
use crate::domain::{AnalysisKind, AnalysisResult, StressScore};

/// Prediction payload: `{"stress_score": 72.5, "nivel": "Alto"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBody {
    pub stress_score: f64,
    #[serde(default)]
    pub nivel: Option<String>,
}

/// The backend answers either with a bare prediction or with a status envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Bare(PredictionBody),
    Envelope {
        status: String,
        #[serde(default)]
        prediction: Option<PredictionBody>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl PredictResponse {
    fn into_prediction(self) -> Result<PredictionBody, AnalysisError> {
        match self {
            Self::Bare(body) => Ok(body),
            Self::Envelope {
                status,
                prediction,
                message,
            } => match (status.as_str(), prediction) {
                ("ok", Some(body)) => Ok(body),
                ("ok", None) => Err(AnalysisError::Decode(
                    "status ok without prediction".to_string(),
                )),
                _ => Err(AnalysisError::Rejected(
                    message.unwrap_or_else(|| format!("status {status}")),
                )),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    image: &'a str,
}

/// Analyzer backed by an HTTP prediction service.
#[derive(Debug, Clone)]
pub struct RemoteAnalyzer {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl RemoteAnalyzer {
    /// Prediction path relative to the backend base URL.
    const PREDICT_PATH: &'static str = "predict/image";

    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let mut base = reqwest::Url::parse(base_url)
            .map_err(|e| AnalysisError::Transport(format!("invalid backend URL {base_url}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(Self::PREDICT_PATH)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Result-view message for a backend level label.
fn level_message(level: &str) -> String {
    format!("Según el análisis de tu expresión facial, tu nivel de estrés es {level}.")
}

#[async_trait]
impl StressAnalyzer for RemoteAnalyzer {
    async fn analyze_image(&self, image: &CapturedImage) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = image.bytes().len(), "Posting image to analysis backend");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&PredictRequest {
                image: image.encoded(),
            })
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::BackendStatus { status, body });
        }

        let prediction = response
            .json::<PredictResponse>()
            .await
            .map_err(|e| AnalysisError::Decode(e.to_string()))?
            .into_prediction()?;

        let score = StressScore::from_f64(prediction.stress_score);
        let level = prediction
            .nivel
            .unwrap_or_else(|| score.band().label().to_lowercase());

        Ok(AnalysisResult::new(AnalysisKind::Photo, score, level_message(&level)).with_level(level))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
