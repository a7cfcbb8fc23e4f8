// src/analysis/mod.rs
use std::fmt;

use chrono::{DateTime, Local};
use thiserror::Error;

pub mod lifecycle;
pub mod metrics;

// Re-export commonly used types
pub use lifecycle::{LifecycleState, RequestLifecycle};
pub use metrics::{format_percent, ModelMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Parses a service prediction label, ignoring case and surrounding space.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text { text: String },
    Batch { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some text to analyze")]
    EmptyText,
    #[error("The file '{file_name}' is empty")]
    EmptyFile { file_name: String },
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AnalysisRequest::Text { text } if text.trim().is_empty() => Err(ValidationError::EmptyText),
            AnalysisRequest::Batch { file_name, bytes } if bytes.is_empty() => {
                Err(ValidationError::EmptyFile {
                    file_name: file_name.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Text { .. } => "text",
            AnalysisRequest::Batch { .. } => "batch",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub raw_table: String,
    pub request_id: Option<String>,
    pub drift_detected: bool,
    pub received_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    SinglePrediction {
        label: Sentiment,
        confidence: Option<f64>,
    },
    Batch(BatchResult),
}
