// src/config/mod.rs
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "sentiment-workbench";
const LOCAL_CONFIG: &str = "sentiment.toml";
const ENV_PREFIX: &str = "SENTIMENT";

const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_EXPORT_FILE_NAME: &str = "analysis_result.csv";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
    #[error("service_url must not be empty")]
    EmptyServiceUrl,
    #[error("page_size must be greater than zero")]
    ZeroPageSize,
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("export_file_name must not be empty")]
    EmptyExportFileName,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub service_url: String,
    pub page_size: usize,
    pub export_file_name: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then the user config file, then `./sentiment.toml`,
    /// then `SENTIMENT_*` environment variables. Later sources win.
    pub fn load() -> Result<Self, ConfigError> {
        let mut files = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            files.push(dir.join(APP_DIR).join("config.toml"));
        }
        files.push(PathBuf::from(LOCAL_CONFIG));
        Self::load_from(&files, Some(ENV_PREFIX))
    }

    pub fn load_from(files: &[PathBuf], env_prefix: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("service_url", defaults.service_url)?
            .set_default("page_size", defaults.page_size as i64)?
            .set_default("export_file_name", defaults.export_file_name)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?;

        for path in files {
            debug!("Config source: {} (optional)", path.display());
            builder = builder.add_source(File::from(path.clone()).required(false));
        }
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(Environment::with_prefix(prefix).try_parsing(true));
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_url.trim().is_empty() {
            return Err(ConfigError::EmptyServiceUrl);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyExportFileName);
        }
        Ok(())
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
