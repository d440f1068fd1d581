use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{error::AppError, models::TableSort};

pub const DEFAULT_BASE_URL: &str = "https://68de50cbd7b591b4b78f1320.mockapi.io/api";
pub const CONFIG_FILE_NAME: &str = "operator-desk.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            cache_ttl_secs: 60,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
    /// Addon columns promoted ahead of the alphabetical remainder, in this order.
    pub pinned_columns: Vec<String>,
    pub default_sort: TableSort,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 10,
            rows_per_page_options: vec![5, 10, 25, 50],
            pinned_columns: vec!["SMTP".to_string(), "JBOD".to_string()],
            default_sort: TableSort::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Config("api.timeout_secs must be positive".into()));
        }
        if self.table.rows_per_page == 0 {
            return Err(AppError::Config("table.rows_per_page must be positive".into()));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, AppError> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| AppError::Config(format!("failed to read config file {:?}: {}", path_ref, e)))?;
    AppConfig::from_toml_str(&contents)
}

/// Same as [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig, AppError> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::info!("No config at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }
    load_config(path_ref)
}
