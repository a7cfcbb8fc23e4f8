// src/ui/results.rs
use std::num::NonZeroUsize;

use eframe::egui;

use crate::file;
use crate::state::{Navigation, ResultsContent, ResultsState, LABEL_COLUMN};
use crate::ui::{error_label, sentiment_text};

const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

pub fn show_results_view(
    ui: &mut egui::Ui,
    results: &mut ResultsState,
    error_message: &mut Option<String>,
) -> Option<Navigation> {
    let mut navigation = None;

    if let ResultsContent::Missing(miss) = results.content() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("No Data Found");
            ui.label(miss.to_string());
            ui.add_space(8.0);
            if ui.button("Go Back").clicked() {
                navigation = Some(Navigation::BatchUpload { fresh: false });
            }
        });
        return navigation;
    }

    let mut export_requested = false;
    ui.horizontal(|ui| {
        if ui.button("⬅").on_hover_text("Back to upload").clicked() {
            navigation = Some(Navigation::BatchUpload { fresh: false });
        }
        ui.heading("Analysis Results");

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Upload New File").clicked() {
                navigation = Some(Navigation::BatchUpload { fresh: true });
            }
            let download = ui
                .add_enabled(results.can_export(), egui::Button::new("⬇ Download CSV"))
                .on_hover_ui(|ui| {
                    if let Some(artifact) = results.export_artifact() {
                        ui.label(format!(
                            "{} ({}, {} bytes)",
                            artifact.file_name(),
                            artifact.content_type(),
                            artifact.bytes().len()
                        ));
                    }
                });
            export_requested = download.clicked();
        });
    });
    if export_requested {
        export_results(results, error_message);
    }
    ui.add_space(4.0);
    ui.separator();

    if let ResultsContent::Unreadable { reason, .. } = results.content() {
        ui.add_space(8.0);
        error_label(ui, &format!("The result table could not be read: {}", reason));
        ui.label("The raw file can still be downloaded.");
        return navigation;
    }

    let Some(table) = results.table() else {
        return navigation;
    };

    if let Some(summary) = results.label_summary() {
        ui.horizontal_wrapped(|ui| {
            for (label, count) in summary {
                let shown = if label.is_empty() { "(blank)" } else { label.as_str() };
                ui.label(sentiment_text(shown));
                ui.label(format!("{}", count));
                ui.add_space(12.0);
            }
        });
    }

    let mut page_size = results.pager().page_size().get();
    egui::ComboBox::from_label("Rows per page")
        .selected_text(page_size.to_string())
        .show_ui(ui, |ui| {
            for option in PAGE_SIZE_OPTIONS {
                ui.selectable_value(&mut page_size, option, option.to_string());
            }
        });
    ui.add_space(4.0);

    if table.is_empty() {
        ui.label("The result table has no rows.");
    } else if let Some(page) = results.current_page() {
        let label_column = table.headers().iter().position(|h| h == LABEL_COLUMN);
        egui::ScrollArea::both()
            .id_source("results_table_scroll")
            .max_height((ui.available_height() - 40.0).max(120.0))
            .show(ui, |ui| {
                egui::Grid::new("results_table")
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for header in table.headers() {
                            ui.label(egui::RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in page.visible {
                            for (i, field) in row.iter().enumerate() {
                                if Some(i) == label_column {
                                    ui.label(sentiment_text(field));
                                } else {
                                    ui.label(field);
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    ui.add_space(4.0);
    let pager = results.pager();
    let (mut go_previous, mut go_next) = (false, false);
    ui.horizontal(|ui| {
        if let Some((start, end)) = pager.showing_range() {
            ui.label(format!("Showing {} to {} of {} results", start, end, table.len()));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if pager.has_multiple_pages() {
                go_next = ui.add_enabled(!pager.is_last(), egui::Button::new("Next ➡")).clicked();
                ui.label(format!("Page {} of {}", pager.page_index(), pager.total_pages()));
                go_previous = ui
                    .add_enabled(!pager.is_first(), egui::Button::new("⬅ Previous"))
                    .clicked();
            }
        });
    });

    if let Some(size) = NonZeroUsize::new(page_size) {
        if size != results.pager().page_size() {
            results.set_page_size(size);
        }
    }
    if go_previous {
        results.previous_page();
    }
    if go_next {
        results.next_page();
    }

    navigation
}

fn export_results(results: &ResultsState, error_message: &mut Option<String>) {
    let Some(artifact) = results.export_artifact() else {
        return;
    };
    if let Err(e) = file::save_with_dialog(&artifact) {
        *error_message = Some(format!("Failed to export results: {:#}", e));
    }
}
