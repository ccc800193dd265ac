use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote task collection endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Cards shown per column page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Bound on retained undo snapshots.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://tasks-manager-test.fly.dev/api/tasks".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_page_size() -> usize {
    crate::board::DEFAULT_PAGE_SIZE
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: default_theme(),
            page_size: default_page_size(),
            history_limit: default_history_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
