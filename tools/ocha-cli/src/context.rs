//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use ocha_sdk::{AppConfig, Storefront};

use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 2] = ["ocha.toml", ".ocha.toml"];

/// Execution context for CLI commands.
pub struct Context {
    /// Resolved configuration.
    pub config: AppConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Session, cart and order state.
    pub shop: Storefront,
}

impl Context {
    /// Load config and open the storefront.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                find_config(&cwd)
            }
        };

        let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }
        output.debug(&format!("API: {}", config.api.base_url));
        output.debug(&format!("Data: {}", config.storage.data_dir.display()));

        let shop = Storefront::open(&config).context("Failed to open local storage")?;

        Ok(Self {
            config,
            config_path,
            output,
            shop,
        })
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
