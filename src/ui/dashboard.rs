// src/ui/dashboard.rs
use eframe::egui;

use crate::analysis::{format_percent, ModelMetrics};
use crate::service::TaskState;
use crate::state::{DashboardState, Navigation};
use crate::ui::error_label;

pub fn show_dashboard_view(ui: &mut egui::Ui, dashboard: Option<&DashboardState>) -> Option<Navigation> {
    let mut navigation = None;

    ui.horizontal(|ui| {
        ui.heading("Model Dashboard");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let loading = dashboard.is_some_and(|d| d.metrics.is_loading());
            if ui.add_enabled(!loading, egui::Button::new("🔄 Refresh")).clicked() {
                navigation = Some(Navigation::Dashboard);
            }
        });
    });
    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    let Some(dashboard) = dashboard else {
        return navigation;
    };

    match dashboard.metrics.state() {
        TaskState::Idle => {}
        TaskState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading model metrics...");
            });
        }
        TaskState::Failed(e) => {
            error_label(ui, &format!("Could not load model metrics: {}", e));
        }
        TaskState::Loaded(metrics) => draw_metrics(ui, metrics),
    }

    navigation
}

fn draw_metrics(ui: &mut egui::Ui, metrics: &ModelMetrics) {
    let cards = metrics.cards();

    ui.columns(cards.len(), |columns| {
        for (ui, (label, value)) in columns.iter_mut().zip(cards) {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(label);
                    ui.label(egui::RichText::new(format_percent(value)).heading().strong());
                });
            });
        }
    });
    ui.add_space(12.0);

    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Performance");
            let plot = egui_plot::Plot::new("metrics_chart")
                .height(220.0)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .show_background(false)
                .show_axes([false, true])
                .include_y(0.0)
                .include_y(100.0);

            plot.show(ui, |plot_ui| {
                // Missing values are left out rather than drawn as zero
                let bars: Vec<egui_plot::Bar> = cards
                    .iter()
                    .enumerate()
                    .filter_map(|(i, (label, value))| {
                        let value = value.filter(|v| v.is_finite())?;
                        Some(
                            egui_plot::Bar::new(i as f64, value * 100.0)
                                .name(*label)
                                .width(0.6)
                                .fill(egui::Color32::from_rgb(100, 150, 255)),
                        )
                    })
                    .collect();

                plot_ui.bar_chart(egui_plot::BarChart::new(bars));
            });

            ui.horizontal(|ui| {
                for (label, _) in &cards {
                    ui.label(*label);
                    ui.add_space(8.0);
                }
            });
        });
    });
}
