use serde::Deserialize;
use std::path::Path;

use crate::adapters::store::jsonl_event_store::DEFAULT_LOG_FILE;
use crate::core::errors::{LogError, Result};
use crate::core::models::query::DEFAULT_PAGE_SIZE;

/// Top-level configuration read from `{data_dir}/config.toml`.
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub store: Option<StoreSection>,
    pub query: Option<QuerySection>,
    pub directory: Option<DirectorySection>,
    pub logging: Option<LoggingSection>,
}

impl AppConfig {
    /// Load the configuration from `{data_dir}/config.toml`.
    ///
    /// After parsing, validates file names so a tampered config cannot
    /// point the tool outside the data directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| LogError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if let Some(store) = &config.store {
            crate::cli::context::validate_simple_filename(&store.log_file, "log file")?;
        }
        if let Some(directory) = &config.directory {
            crate::cli::context::validate_simple_filename(&directory.users_file, "users file")?;
        }
        if let Some(query) = &config.query
            && query.page_size == 0
        {
            return Err(LogError::InvalidConfig {
                detail: "[query] page_size must be greater than zero".into(),
            });
        }

        Ok(config)
    }

    /// Page size for `list` when `--page-size` is not given.
    pub fn page_size(&self) -> usize {
        self.query
            .as_ref()
            .map(|q| q.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// File name of the user directory inside the data directory.
    pub fn users_file(&self) -> &str {
        self.directory
            .as_ref()
            .map(|d| d.users_file.as_str())
            .unwrap_or(DEFAULT_USERS_FILE)
    }

    pub fn log_level(&self) -> LogLevel {
        self.logging.as_ref().map(|l| l.level).unwrap_or_default()
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }
}

/// Default user directory file name.
pub const DEFAULT_USERS_FILE: &str = "users.toml";

/// The `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

/// The `[query]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySection {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// The `[directory]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySection {
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}

/// The `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
