//! Local storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Local storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding per-persona prompt config overrides
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.config_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyConfigDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("data/prompt_configs")
}
