#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{DEFAULT_DATA_FILE, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::path::PathBuf;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

/// Effective settings after merging command-line flags, the optional
/// settings file and built-in defaults, in that order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub atomic_writes: bool,
    pub low_stock_threshold: i64,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            atomic_writes: true,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_level: None,
        }
    }
}

impl Settings {
    pub fn resolve(data_file: Option<&str>, file_config: Option<&TomlConfig>) -> Result<Self> {
        let defaults = Self::default();

        if let Some(config) = file_config {
            config.validate()?;
        }

        let data_file = match data_file.or_else(|| file_config.and_then(|c| c.data_file())) {
            Some(path) => {
                validate_path("data_file", path)?;
                PathBuf::from(path)
            }
            None => defaults.data_file,
        };

        Ok(Self {
            data_file,
            atomic_writes: file_config
                .and_then(|c| c.atomic_writes())
                .unwrap_or(defaults.atomic_writes),
            low_stock_threshold: file_config
                .and_then(|c| c.low_stock_threshold())
                .unwrap_or(defaults.low_stock_threshold),
            log_level: file_config.and_then(|c| c.log_level()).map(str::to_string),
        })
    }
}
