//! Application configuration.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then the
//! `OCHA_API_URL` and `OCHA_DATA_DIR` environment variables.

use crate::error::ConfigError;
use directories::BaseDirs;
use ocha_data::{ApiConfig, API_URL_ENV};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the local data directory.
pub const DATA_DIR_ENV: &str = "OCHA_DATA_DIR";

/// Configuration for one storefront session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where session and cart state is kept between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per cache key.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Platform data directory plus `ocha`, or `./.ocha` when there is none.
pub fn default_data_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.data_dir().join("ocha"))
        .unwrap_or_else(|| PathBuf::from(".ocha"))
}

impl AppConfig {
    /// Load config from an optional file and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML config text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    ///
    /// Blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = var(API_URL_ENV) {
            self.api = ApiConfig::new(url)?;
        }
        if let Some(dir) = var(DATA_DIR_ENV) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.data_dir is empty".to_string()));
        }
        Ok(())
    }

    /// Render as TOML, as accepted by [`from_toml_str`](Self::from_toml_str).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
