// src/ui/text_analysis.rs
use eframe::egui;

use crate::analysis::{AnalysisResult, LifecycleState};
use crate::state::TextAnalysisState;
use crate::ui::{error_label, sentiment_color};

pub fn show_text_analysis_view(ui: &mut egui::Ui, state: &mut TextAnalysisState) {
    ui.heading("Analyze Text");
    ui.add_space(4.0);
    ui.label("Enter a review and the classification service will predict its sentiment.");
    ui.add_space(8.0);

    ui.add(
        egui::TextEdit::multiline(&mut state.input)
            .hint_text("Type or paste a review...")
            .desired_rows(8)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.can_submit(), egui::Button::new("▶ Analyze"))
            .clicked()
        {
            state.submit();
        }
        if ui.button("Clear").clicked() {
            state.input.clear();
            state.validation_error = None;
            state.lifecycle.reset();
        }
        if state.lifecycle.is_submitting() {
            ui.spinner();
            ui.label("Analyzing...");
        }
    });

    if let Some(error) = &state.validation_error {
        error_label(ui, error);
    }

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    match state.lifecycle.state() {
        LifecycleState::Succeeded(AnalysisResult::SinglePrediction { label, confidence }) => {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label("Prediction:");
                    ui.label(
                        egui::RichText::new(label.label())
                            .color(sentiment_color(*label))
                            .heading()
                            .strong(),
                    );
                });
                if let Some(confidence) = confidence {
                    ui.label(format!("Confidence: {:.1}%", confidence * 100.0));
                }
            });
        }
        LifecycleState::Failed(e) => error_label(ui, &e.to_string()),
        _ => {}
    }
}
