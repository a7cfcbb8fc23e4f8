// src/main.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use log::info;

mod analysis;
mod app;
mod config;
mod file;
mod service;
mod state;
mod table;
mod ui;

use app::SentimentApp;
use config::AppConfig;
use service::HttpClassificationService;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let service = HttpClassificationService::new(&config.service_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    info!("Using classification service at {}", service.base_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Sentiment Workbench")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Sentiment Workbench",
        options,
        Box::new(move |_cc| Box::new(SentimentApp::new(config, Arc::new(service)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
