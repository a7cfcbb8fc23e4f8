// src/ui/batch_upload.rs
use eframe::egui;

use crate::file;
use crate::state::{Navigation, UploadState};
use crate::ui::error_label;

pub fn show_batch_upload_view(ui: &mut egui::Ui, state: &mut UploadState) -> Option<Navigation> {
    let mut navigation = None;

    // Only the first dropped file with a real path is taken
    let dropped = ui.ctx().input(|i| i.raw.dropped_files.clone());
    if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
        state.select(path);
    }
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

    ui.heading("Batch Analysis");
    ui.add_space(4.0);
    ui.label("Upload a CSV of reviews to classify every row at once.");
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(80.0);
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            if hovering {
                ui.label(egui::RichText::new("Drop the file to select it").strong());
            } else {
                ui.label("Drag a CSV file here, or");
            }
            if ui.button("📂 Browse...").clicked() {
                if let Some(path) = file::pick_batch_file() {
                    state.select(path);
                }
            }
            if let Some(selected) = &state.selected {
                ui.add_space(4.0);
                ui.label(format!("Selected: {}", selected.name))
                    .on_hover_text(selected.path.display().to_string());
            }
        });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.lifecycle.is_submitting(), egui::Button::new("▶ Analyze"))
            .clicked()
        {
            state.submit();
        }
        if state.lifecycle.is_submitting() {
            ui.spinner();
            ui.label("Uploading and analyzing...");
        }
    });

    if let Some(error) = &state.input_error {
        error_label(ui, error);
    }
    if let Some(error) = state.lifecycle.error() {
        error_label(ui, &error.to_string());
    }

    if let Some(batch) = state.batch_result() {
        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        ui.label(format!(
            "Last analysis finished at {}",
            batch.received_at.format("%Y-%m-%d %H:%M:%S")
        ));
        if let Some(request_id) = &batch.request_id {
            ui.label(format!("Request ID: {}", request_id));
        }
        if batch.drift_detected {
            ui.label(
                egui::RichText::new("⚠ Data drift detected in this batch")
                    .color(egui::Color32::from_rgb(230, 160, 40)),
            );
        }
        if ui.button("View Results").clicked() {
            navigation = state.open_results();
        }
    }

    navigation
}
