// src/service/mod.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{AnalysisRequest, AnalysisResult, BatchResult, ModelMetrics, Sentiment};

pub mod http;
pub mod task;

pub use http::HttpClassificationService;
pub use task::{OneShotTask, TaskState};

/// Prediction label the service returns when no production model is loaded.
const MODEL_NOT_FOUND: &str = "model_not_found";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Classification service unreachable: {0}")]
    Unreachable(String),
    #[error("Classification service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response from classification service: {0}")]
    InvalidBody(String),
    #[error("No production model is loaded on the classification service")]
    ModelUnavailable,
    #[error("Classification service returned an unknown label '{0}'")]
    UnrecognizedPrediction(String),
    #[error("Request worker stopped before reporting a result")]
    WorkerLost,
}

// Core trait for talking to the classification service
pub trait ClassificationService: Send + Sync {
    fn predict_text(&self, text: &str) -> Result<AnalysisResult, ServiceError>;
    fn predict_batch(&self, file_name: &str, bytes: &[u8]) -> Result<BatchResult, ServiceError>;
    fn fetch_metrics(&self) -> Result<ModelMetrics, ServiceError>;
    fn healthcheck(&self) -> Result<(), ServiceError>;
}

/// Issues exactly one service call for `request`.
pub fn dispatch(
    service: &dyn ClassificationService,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, ServiceError> {
    match request {
        AnalysisRequest::Text { text } => service.predict_text(text),
        AnalysisRequest::Batch { file_name, bytes } => service
            .predict_batch(file_name, bytes)
            .map(AnalysisResult::Batch),
    }
}

#[derive(Debug, Serialize)]
pub struct TextPayload<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl PredictionResponse {
    pub fn into_result(self) -> Result<AnalysisResult, ServiceError> {
        if self.prediction == MODEL_NOT_FOUND {
            return Err(ServiceError::ModelUnavailable);
        }
        let label = Sentiment::from_label(&self.prediction)
            .ok_or_else(|| ServiceError::UnrecognizedPrediction(self.prediction.clone()))?;
        Ok(AnalysisResult::SinglePrediction {
            label,
            confidence: self.confidence.filter(|c| c.is_finite()),
        })
    }
}
