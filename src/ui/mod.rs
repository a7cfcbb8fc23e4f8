// src/ui/mod.rs
use eframe::egui;

use crate::analysis::Sentiment;

pub mod batch_upload;
pub mod dashboard;
pub mod results;
pub mod text_analysis;

pub fn sentiment_color(sentiment: Sentiment) -> egui::Color32 {
    match sentiment {
        Sentiment::Positive => egui::Color32::from_rgb(100, 200, 100),
        Sentiment::Negative => egui::Color32::from_rgb(200, 100, 100),
        Sentiment::Neutral => egui::Color32::GRAY,
    }
}

/// Label text for a cell or badge, coloured when it names a sentiment.
pub fn sentiment_text(value: &str) -> egui::RichText {
    match Sentiment::from_label(value) {
        Some(sentiment) => egui::RichText::new(value).color(sentiment_color(sentiment)).strong(),
        None => egui::RichText::new(value),
    }
}

pub(crate) fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(egui::Color32::RED));
}
