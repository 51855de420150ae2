//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Number of row errors shown before the report is cut off
pub const DEFAULT_ERROR_LIMIT: usize = 10;

/// Bizdesk configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the record store database
    pub store: Option<PathBuf>,

    /// Maximum number of row errors listed in an import report
    pub error_limit: Option<usize>,

    /// Prefix CSV exports with a UTF-8 byte-order mark
    pub export_bom: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Config file (BIZDESK_CONFIG, else ~/.config/bizdesk/config.yaml)
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match Self::from_yaml(&contents) {
                        Ok(file_config) => config.merge(file_config),
                        Err(e) => tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "ignoring invalid config file"
                        ),
                    },
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "cannot read config file"
                    ),
                }
            }
        }

        // 3. Environment variables (BIZDESK_STORE is read by the `--store` flag)
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Parse a YAML config document
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }

    /// Path of the config file that `load` reads
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("BIZDESK_CONFIG") {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("", "", "bizdesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(limit) = var("BIZDESK_ERROR_LIMIT") {
            match limit.trim().parse() {
                Ok(limit) => self.error_limit = Some(limit),
                Err(_) => {
                    tracing::warn!(value = %limit, "ignoring non-numeric BIZDESK_ERROR_LIMIT");
                }
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.store.is_some() {
            self.store = other.store;
        }
        if other.error_limit.is_some() {
            self.error_limit = other.error_limit;
        }
        if other.export_bom.is_some() {
            self.export_bom = other.export_bom;
        }
    }

    /// Store path, falling back to the platform data directory
    pub fn store_path(&self) -> PathBuf {
        if let Some(ref store) = self.store {
            return store.clone();
        }
        directories::ProjectDirs::from("", "", "bizdesk")
            .map(|dirs| dirs.data_dir().join("bizdesk.db"))
            .unwrap_or_else(|| PathBuf::from("bizdesk.db"))
    }

    pub fn error_limit(&self) -> usize {
        self.error_limit.unwrap_or(DEFAULT_ERROR_LIMIT)
    }

    pub fn export_bom(&self) -> bool {
        self.export_bom.unwrap_or(true)
    }
}
