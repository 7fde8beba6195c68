use crate::error::ConfigError;
use crate::models::scan_types::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long the simulated analysis waits before answering.
    pub analysis_latency_ms: u64,
    /// Category preselected when the window opens.
    pub default_category: Category,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis_latency_ms: 2000,
            default_category: Category::BrainTumor,
        }
    }
}

impl AppConfig {
    /// Loads settings from `path`; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn analysis_latency(&self) -> Duration {
        Duration::from_millis(self.analysis_latency_ms)
    }
}
