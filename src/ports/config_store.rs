//! Config Store Port - local key-value persistence for prompt overrides.
//!
//! Overrides are stored per persona. The store knows nothing about
//! versions; reconciliation against shipped defaults happens in the
//! persona configuration service.

use async_trait::async_trait;

use crate::domain::foundation::Persona;
use crate::domain::prompt::PromptConfig;

/// Errors that can occur during config store operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
    #[error("Failed to serialize config: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting per-persona prompt config overrides.
#[async_trait]
pub trait PromptConfigStore: Send + Sync {
    /// Reads the override for a persona, if one exists.
    async fn get(&self, persona: Persona) -> Result<Option<PromptConfig>, ConfigStoreError>;

    /// Writes the override for a persona, replacing any existing one.
    async fn put(&self, persona: Persona, config: &PromptConfig) -> Result<(), ConfigStoreError>;

    /// Deletes the override for a persona. Deleting a missing key is a
    /// no-op.
    async fn delete(&self, persona: Persona) -> Result<(), ConfigStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_store_error_displays_correctly() {
        let err = ConfigStoreError::IoError("permission denied".to_string());
        assert_eq!(err.to_string(), "IO error: permission denied");
    }
}
