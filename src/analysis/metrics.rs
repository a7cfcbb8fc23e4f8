// src/analysis/metrics.rs
use serde::Deserialize;

/// Evaluation metrics of the production model, as reported by the service.
/// Every field is optional: the service omits what it does not have, and an
/// `{"error": ...}` body simply deserializes to all-missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: Option<f64>,
    pub macro_precision: Option<f64>,
    pub macro_recall: Option<f64>,
    pub macro_f1: Option<f64>,
}

impl ModelMetrics {
    pub fn cards(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("Accuracy", self.accuracy),
            ("Precision", self.macro_precision),
            ("Recall", self.macro_recall),
            ("F1 Score", self.macro_f1),
        ]
    }
}

pub const MISSING_METRIC: &str = "-";

/// Formats a `[0,1]` ratio as a percentage with two decimals. Missing or
/// non-finite values render as a placeholder rather than `0.00%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => MISSING_METRIC.to_string(),
    }
}
