//! Configuration resolution
//!
//! One knob exists: the API base URL. Resolution order is the
//! `SPENDLENS_API_URL` environment variable, then an optional
//! `spendlens.toml` in the platform config directory, then the default.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Default receipts API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// On-disk configuration file shape (`~/.config/spendlens/spendlens.toml`)
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Resolve configuration from the environment, the config file,
    /// or the built-in default
    pub fn load() -> Self {
        if let Ok(url) = std::env::var("SPENDLENS_API_URL") {
            if !url.is_empty() {
                debug!("API URL from environment: {}", url);
                return Self { api_url: url };
            }
        }

        if let Some(url) = Self::config_path().and_then(Self::read_api_url) {
            debug!("API URL from config file: {}", url);
            return Self { api_url: url };
        }

        Self::default()
    }

    /// Build a config with an explicit URL (CLI flag override)
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
        }
    }

    fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("spendlens").join("spendlens.toml"))
    }

    fn read_api_url(path: PathBuf) -> Option<String> {
        let contents = std::fs::read_to_string(path).ok()?;
        let file: ConfigFile = toml::from_str(&contents).ok()?;
        file.api_url
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
