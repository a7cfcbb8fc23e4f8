// src/state/mod.rs
use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::analysis::{AnalysisRequest, AnalysisResult, BatchResult, ModelMetrics, RequestLifecycle};
use crate::config::AppConfig;
use crate::service::{ClassificationService, OneShotTask};

pub mod results_state;
pub mod transfer;

pub use results_state::{ResultsContent, ResultsState, LABEL_COLUMN};
pub use transfer::{TransferEnvelope, TransferMiss};

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    TextAnalysis,
    BatchUpload,
    Results,
    Dashboard,
}

/// A request to mount another view. The results variant carries the transfer
/// envelope with it, so the payload never sits in shared state.
#[derive(Debug)]
pub enum Navigation {
    TextAnalysis,
    BatchUpload { fresh: bool },
    Results(Option<TransferEnvelope>),
    Dashboard,
}

impl Navigation {
    pub fn target(&self) -> Screen {
        match self {
            Navigation::TextAnalysis => Screen::TextAnalysis,
            Navigation::BatchUpload { .. } => Screen::BatchUpload,
            Navigation::Results(_) => Screen::Results,
            Navigation::Dashboard => Screen::Dashboard,
        }
    }
}

pub struct TextAnalysisState {
    pub input: String,
    pub lifecycle: RequestLifecycle,
    pub validation_error: Option<String>,
}

impl TextAnalysisState {
    pub fn new(service: Arc<dyn ClassificationService>) -> Self {
        Self {
            input: String::new(),
            lifecycle: RequestLifecycle::new(service),
            validation_error: None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.lifecycle.is_submitting()
    }

    pub fn submit(&mut self) {
        let request = AnalysisRequest::Text {
            text: self.input.clone(),
        };
        self.validation_error = self.lifecycle.submit(request).err().map(|e| e.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

pub struct UploadState {
    pub selected: Option<SelectedFile>,
    pub lifecycle: RequestLifecycle,
    pub input_error: Option<String>,
}

impl UploadState {
    pub fn new(service: Arc<dyn ClassificationService>) -> Self {
        Self {
            selected: None,
            lifecycle: RequestLifecycle::new(service),
            input_error: None,
        }
    }

    pub fn select(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!("Selected batch file {}", name);
        self.selected = Some(SelectedFile { name, path });
        self.input_error = None;
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.lifecycle.is_submitting()
    }

    pub fn submit(&mut self) {
        let Some(selected) = &self.selected else {
            self.input_error = Some("Please upload a CSV file first!".to_string());
            return;
        };
        let request = match crate::file::read_batch_request(&selected.path) {
            Ok(request) => request,
            Err(e) => {
                warn!("{:#}", e);
                self.input_error = Some(format!("{:#}", e));
                return;
            }
        };
        self.input_error = self.lifecycle.submit(request).err().map(|e| e.to_string());
    }

    pub fn batch_result(&self) -> Option<&BatchResult> {
        match self.lifecycle.result() {
            Some(AnalysisResult::Batch(batch)) => Some(batch),
            _ => None,
        }
    }

    /// Seals the current batch result into an envelope for the results view.
    pub fn open_results(&self) -> Option<Navigation> {
        self.batch_result()
            .map(|batch| Navigation::Results(Some(TransferEnvelope::send(batch.raw_table.clone()))))
    }

    /// Polls the lifecycle. A batch that succeeds while the upload view is
    /// on screen navigates straight to the results; otherwise the result is
    /// kept for "View Results".
    pub fn poll(&mut self, on_screen: bool) -> Option<Navigation> {
        if self.lifecycle.poll() && on_screen {
            return self.open_results();
        }
        None
    }
}

pub struct DashboardState {
    pub metrics: OneShotTask<ModelMetrics>,
}

impl DashboardState {
    /// Mounting the dashboard fetches the metrics once.
    pub fn mount(service: Arc<dyn ClassificationService>) -> Self {
        let mut metrics = OneShotTask::new("metrics-fetch");
        metrics.start(move || service.fetch_metrics());
        Self { metrics }
    }
}

// Core application state
pub struct AppState {
    pub config: AppConfig,
    pub service: Arc<dyn ClassificationService>,

    pub current_screen: Screen,
    pub text: TextAnalysisState,
    pub upload: UploadState,
    pub results: ResultsState,
    pub dashboard: Option<DashboardState>,

    pub health: OneShotTask<()>,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, service: Arc<dyn ClassificationService>) -> Self {
        let results = ResultsState::mount(None, config.page_size(), &config.export_file_name);
        Self {
            text: TextAnalysisState::new(Arc::clone(&service)),
            upload: UploadState::new(Arc::clone(&service)),
            results,
            dashboard: None,
            health: OneShotTask::new("healthcheck"),
            error_message: None,
            current_screen: Screen::TextAnalysis,
            config,
            service,
        }
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        info!("Navigating to {:?}", navigation.target());
        self.current_screen = navigation.target();
        match navigation {
            Navigation::TextAnalysis => {}
            Navigation::BatchUpload { fresh } => {
                if fresh {
                    // Replacing the view state drops any in-flight response.
                    self.upload = UploadState::new(Arc::clone(&self.service));
                }
            }
            Navigation::Results(envelope) => {
                self.results = ResultsState::mount(
                    envelope,
                    self.config.page_size(),
                    &self.config.export_file_name,
                );
            }
            Navigation::Dashboard => {
                self.dashboard = Some(DashboardState::mount(Arc::clone(&self.service)));
            }
        }
    }

    pub fn check_connection(&mut self) {
        let service = Arc::clone(&self.service);
        self.health.start(move || service.healthcheck());
    }

    /// Advances every background task. Returns true while any is still
    /// running, so the shell keeps repainting.
    pub fn poll(&mut self) -> bool {
        self.text.lifecycle.poll();
        let upload_on_screen = self.current_screen == Screen::BatchUpload;
        if let Some(navigation) = self.upload.poll(upload_on_screen) {
            self.navigate(navigation);
        }
        if let Some(dashboard) = &mut self.dashboard {
            dashboard.metrics.poll();
        }
        self.health.poll();

        self.text.lifecycle.is_submitting()
            || self.upload.lifecycle.is_submitting()
            || self.dashboard.as_ref().is_some_and(|d| d.metrics.is_loading())
            || self.health.is_loading()
    }
}
