use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{Result, ViewerError};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub viewer: DisplayConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the inference service, without a trailing path.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial state of the heatmap toggle.
    pub heatmap_visible: bool,
    /// Open the rating window after each successful classification.
    pub prompt_rating: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            heatmap_visible: true,
            prompt_rating: true,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedbackConfig {
    /// Append submitted ratings as JSON lines to this file. Ratings are only
    /// logged when unset.
    pub log_path: Option<PathBuf>,
}

impl ViewerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ViewerError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ViewerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if given, otherwise defaults, then apply environment overrides.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    /// Replace the server URL when `url` is a non-empty value.
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.server.base_url = url;
        }
        self
    }
}
