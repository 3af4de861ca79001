//! Dashboard configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.dashboard/
//!   config.yaml   (optional — defaults apply when absent)
//! ```
//!
//! # API pattern
//!
//! - `load_at(home: &Path)` / `save_at(home: &Path)` — explicit home; used in tests
//! - `load()` — derives home from `dirs::home_dir()`, delegates to `load_at`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTH_PATH: &str = "/api/auth?back=/dashboard/guild";

/// Where the dashboard backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Origin the `/api/...` routes are resolved against.
    pub base_url: String,
    /// Per-request timeout for the HTTP transport.
    pub timeout_secs: u64,
    /// Route the user is sent to when the session is unauthorized.
    pub auth_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auth_path: DEFAULT_AUTH_PATH.to_string(),
        }
    }
}

impl DashboardConfig {
    /// `<home>/.dashboard/config.yaml` — pure, no I/O.
    pub fn path_at(home: &Path) -> PathBuf {
        home.join(".dashboard").join("config.yaml")
    }

    /// Load from `<home>/.dashboard/config.yaml`, falling back to defaults
    /// when the file does not exist.
    pub fn load_at(home: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_at(home);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        let config: Self =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// `load_at` convenience wrapper.
    pub fn load() -> Result<Self, ConfigError> {
        load_home().and_then(|home| Self::load_at(&home))
    }

    /// Write to `<home>/.dashboard/config.yaml`, creating the directory.
    pub fn save_at(&self, home: &Path) -> Result<PathBuf, ConfigError> {
        self.validate()?;
        let path = Self::path_at(home);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(path)
    }

    /// Replace the base URL, e.g. from a CLI flag.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Absolute URL of `path` on the configured backend.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn auth_url(&self) -> String {
        self.url_for(&self.auth_path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }
}

fn load_home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
