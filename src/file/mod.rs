// src/file/mod.rs
use anyhow::{anyhow, Context, Result};
use rfd::FileDialog;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisRequest;

pub mod export;

pub use export::ExportArtifact;

/// Opens the native picker for a batch CSV file.
pub fn pick_batch_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_title("Select CSV File")
        .pick_file()
}

/// Reads a batch file from disk into a submission request.
pub fn read_batch_request(path: &Path) -> Result<AnalysisRequest> {
    if !path.is_file() {
        return Err(anyhow!("Batch file not found: {}", path.display()));
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid batch file path: {}", path.display()))?
        .to_string_lossy()
        .into_owned();
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;

    Ok(AnalysisRequest::Batch { file_name, bytes })
}

/// Asks where to save `artifact` and writes it. `Ok(None)` when the user
/// cancels the dialog.
pub fn save_with_dialog(artifact: &ExportArtifact) -> Result<Option<PathBuf>> {
    let Some(path) = FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_title("Save Analysis Results")
        .set_file_name(artifact.file_name())
        .save_file()
    else {
        return Ok(None);
    };

    artifact.save_to(&path)?;
    Ok(Some(path))
}
