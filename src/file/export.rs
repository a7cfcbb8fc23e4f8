// src/file/export.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// A downloadable copy of the result table currently on screen. The bytes are
/// the held raw table, unchanged; export never rebuilds them from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    /// `None` when there is no table text to export.
    pub fn from_text(text: Option<&str>, file_name: &str) -> Option<Self> {
        let text = text.filter(|t| !t.is_empty())?;
        Some(Self {
            file_name: file_name.to_string(),
            bytes: text.as_bytes().to_vec(),
        })
    }

    pub fn is_available(text: Option<&str>) -> bool {
        text.is_some_and(|t| !t.is_empty())
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.bytes)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        info!("Exported {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }
}
