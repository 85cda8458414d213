//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `CARE_LENS` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use care_lens::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for Care Lens. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Model provider configuration (API key, model, timeout)
    #[serde(default)]
    pub ai: AiConfig,

    /// Local storage configuration (prompt config overrides)
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CARE_LENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CARE_LENS__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `CARE_LENS__AI__MODEL=gemini-1.5-flash` -> `ai.model = ...`
    /// - `CARE_LENS__STORAGE__CONFIG_DIR=/var/lib/care-lens` -> `storage.config_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CARE_LENS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
