// src/app.rs
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::config::AppConfig;
use crate::service::{ClassificationService, TaskState};
use crate::state::{AppState, Navigation, Screen};
use crate::ui;

const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct SentimentApp {
    state: AppState,
}

impl SentimentApp {
    pub fn new(config: AppConfig, service: Arc<dyn ClassificationService>) -> Self {
        let mut state = AppState::new(config, service);
        state.check_connection();
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) -> Option<Navigation> {
        let mut navigation = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("Service", |ui| {
                if ui.button("Check Connection").clicked() {
                    self.state.check_connection();
                    ui.close_menu();
                }
            });

            ui.separator();

            let tabs = [
                (Screen::TextAnalysis, "Analyze Text"),
                (Screen::BatchUpload, "Batch Upload"),
                (Screen::Results, "Results"),
                (Screen::Dashboard, "Dashboard"),
            ];

            for (screen, label) in tabs {
                if ui
                    .selectable_label(self.state.current_screen == screen, label)
                    .clicked()
                    && self.state.current_screen != screen
                {
                    navigation = Some(match screen {
                        Screen::TextAnalysis => Navigation::TextAnalysis,
                        Screen::BatchUpload => Navigation::BatchUpload { fresh: false },
                        // The menu never carries a payload
                        Screen::Results => Navigation::Results(None),
                        Screen::Dashboard => Navigation::Dashboard,
                    });
                }
            }
        });

        navigation
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.state.health.state() {
                TaskState::Idle => {
                    ui.label("Service status unknown");
                }
                TaskState::Loading => {
                    ui.spinner();
                    ui.label("Checking service...");
                }
                TaskState::Loaded(()) => {
                    ui.label(egui::RichText::new("● Service online").color(egui::Color32::from_rgb(100, 200, 100)));
                }
                TaskState::Failed(e) => {
                    ui.label(egui::RichText::new("● Service offline").color(egui::Color32::RED))
                        .on_hover_text(e.to_string());
                }
            }
            ui.separator();
            ui.label(&self.state.config.service_url);
        });
    }
}

impl eframe::App for SentimentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }

        let mut navigation = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            navigation = self.show_menu(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &mut self.state;
            let requested = match state.current_screen {
                Screen::TextAnalysis => {
                    ui::text_analysis::show_text_analysis_view(ui, &mut state.text);
                    None
                }
                Screen::BatchUpload => ui::batch_upload::show_batch_upload_view(ui, &mut state.upload),
                Screen::Results => {
                    ui::results::show_results_view(ui, &mut state.results, &mut state.error_message)
                }
                Screen::Dashboard => ui::dashboard::show_dashboard_view(ui, state.dashboard.as_ref()),
            };
            if requested.is_some() {
                navigation = requested;
            }
        });

        if let Some(navigation) = navigation {
            self.state.navigate(navigation);
        }

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}
