//! Application configuration stored in `{data_dir}/config.yaml`.
//!
//! ```yaml
//! base_url: http://localhost:8080
//! timeout_secs: 30
//! history_merge: replace        # or keep_submitted
//! logout_policy: reset          # or keep
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use persona_core::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HistoryMerge, LogoutPolicy, ScreenOptions};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scheme, host and port of the analysis service
    pub base_url: String,
    /// Read/write timeout for each request
    pub timeout_secs: u64,
    pub history_merge: HistoryMerge,
    pub logout_policy: LogoutPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            history_merge: HistoryMerge::default(),
            logout_policy: LogoutPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load the config file. A missing file yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the config file, falling back to defaults when it cannot be read.
    pub fn load_or_default(data_dir: &Path) -> Self {
        match Self::load(data_dir) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        let yaml =
            serde_saphyr::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::create_dir_all(data_dir)?;
        std::fs::write(Self::path(data_dir), yaml)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            history_merge: self.history_merge,
            logout_policy: self.logout_policy,
        }
    }
}
