use async_trait::async_trait;
use heartcheck_protocol::config::PredictorConfig;
use heartcheck_protocol::{PredictResponse, Verdict};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::PredictionError;
use crate::features::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub verdict: Verdict,
    /// Confidence reported by the model, when it exposes one.
    pub probability: Option<f64>,
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError>;
}

/// Sends one JSON POST per call. No retries.
pub struct HttpPredictor {
    http_client: Client,
    url: String,
    timeout: Duration,
}

impl HttpPredictor {
    pub fn new(config: &PredictorConfig) -> Result<Self, PredictionError> {
        let url = config.validate().map_err(PredictionError::Config)?;
        let timeout = Duration::from_millis(config.timeout_ms);
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PredictionError::Config(err.to_string()))?;
        Ok(Self {
            http_client,
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn exchange(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&features.to_request())
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<PredictResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error_message().map(str::to_string))
                .unwrap_or_else(|| PredictionError::GENERIC_SERVER_MESSAGE.to_string());
            return Err(PredictionError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PredictResponse = serde_json::from_slice(&body)
            .map_err(|err| PredictionError::MalformedResponse(err.to_string()))?;
        let verdict = parsed.verdict().ok_or_else(|| {
            PredictionError::MalformedResponse(
                "expected \"prediction\" (0 or 1) or \"has_risk\"".to_string(),
            )
        })?;
        Ok(Prediction {
            verdict,
            probability: parsed.probability(),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> PredictionError {
        if err.is_timeout() {
            PredictionError::Transport(format!(
                "request timed out after {}",
                format_duration(self.timeout)
            ))
        } else if err.is_connect() {
            PredictionError::Transport(format!("connection failed: {err}"))
        } else {
            PredictionError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        let started = Instant::now();
        let result = self.exchange(features).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(prediction) => info!(
                url = %self.url,
                elapsed_ms,
                verdict = prediction.verdict.code(),
                "prediction received"
            ),
            Err(err) => warn!(
                url = %self.url,
                elapsed_ms,
                kind = err.kind(),
                error = %err,
                "prediction failed"
            ),
        }
        result
    }
}

fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
