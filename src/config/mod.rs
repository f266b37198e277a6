#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::{DEFAULT_API_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use self::toml_config::TomlConfig;

pub const DEFAULT_FAVORITES_DIR: &str = "./.breed-gallery";
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";

/// Effective settings: defaults, then the TOML file, then command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    pub favorites_dir: String,
    pub favorites_key: String,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            favorites_dir: DEFAULT_FAVORITES_DIR.to_string(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            log_level: None,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn merge_file(mut self, file: &TomlConfig) -> Self {
        if let Some(endpoint) = &file.source.endpoint {
            self.api_endpoint = endpoint.clone();
        }
        if let Some(timeout) = file.source.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(directory) = &file.favorites.directory {
            self.favorites_dir = directory.clone();
        }
        if let Some(key) = &file.favorites.key {
            self.favorites_key = key.clone();
        }
        if let Some(level) = &file.logging.level {
            self.log_level = Some(level.clone());
        }
        if let Some(json) = file.logging.json {
            self.json_logs = json;
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn favorites_dir(&self) -> &str {
        &self.favorites_dir
    }

    fn favorites_key(&self) -> &str {
        &self.favorites_key
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.api_endpoint)?;
        validation::validate_range("source.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_path("favorites.directory", &self.favorites_dir)?;
        validation::validate_record_key("favorites.key", &self.favorites_key)?;
        Ok(())
    }
}
