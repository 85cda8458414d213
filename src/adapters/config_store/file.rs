//! File-backed prompt config store.
//!
//! One JSON file per persona under a configured directory. Writes go
//! through a temp file and an atomic rename so a crash mid-write never
//! leaves a truncated override behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::foundation::Persona;
use crate::domain::prompt::PromptConfig;
use crate::ports::{ConfigStoreError, PromptConfigStore};

/// File-backed implementation of the prompt config store.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    directory: PathBuf,
}

impl FileConfigStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn config_path(&self, persona: Persona) -> PathBuf {
        self.directory.join(format!("{}.json", persona.as_key()))
    }

    fn temp_path(&self, persona: Persona) -> PathBuf {
        self.directory.join(format!(".{}.json.tmp", persona.as_key()))
    }

    async fn ensure_directory(&self) -> Result<(), ConfigStoreError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| ConfigStoreError::IoError(e.to_string()))
    }
}

async fn read_if_exists(path: &Path) -> Result<Option<String>, ConfigStoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigStoreError::IoError(e.to_string())),
    }
}

#[async_trait]
impl PromptConfigStore for FileConfigStore {
    async fn get(&self, persona: Persona) -> Result<Option<PromptConfig>, ConfigStoreError> {
        let Some(contents) = read_if_exists(&self.config_path(persona)).await? else {
            return Ok(None);
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| ConfigStoreError::DeserializationFailed(e.to_string()))
    }

    async fn put(&self, persona: Persona, config: &PromptConfig) -> Result<(), ConfigStoreError> {
        self.ensure_directory().await?;

        let contents = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigStoreError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path(persona);
        tokio::fs::write(&temp, contents)
            .await
            .map_err(|e| ConfigStoreError::IoError(e.to_string()))?;

        tokio::fs::rename(&temp, self.config_path(persona))
            .await
            .map_err(|e| ConfigStoreError::IoError(e.to_string()))
    }

    async fn delete(&self, persona: Persona) -> Result<(), ConfigStoreError> {
        match tokio::fs::remove_file(self.config_path(persona)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConfigStoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::shipped_config;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_returns_none_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());
        assert!(store.get(Persona::Family).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());
        let config = shipped_config(Persona::Kindergarten);

        store.put(Persona::Kindergarten, &config).await.unwrap();
        let loaded = store.get(Persona::Kindergarten).await.unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn put_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("configs");
        let store = FileConfigStore::new(&nested);

        store
            .put(Persona::Family, &shipped_config(Persona::Family))
            .await
            .unwrap();
        assert!(nested.join("family.json").exists());
    }

    #[tokio::test]
    async fn delete_removes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());

        store
            .put(Persona::Caregiver, &shipped_config(Persona::Caregiver))
            .await
            .unwrap();
        store.delete(Persona::Caregiver).await.unwrap();

        assert!(store.get(Persona::Caregiver).await.unwrap().is_none());
        assert!(store.delete(Persona::Caregiver).await.is_ok());
    }

    #[tokio::test]
    async fn corrupted_file_surfaces_deserialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());

        tokio::fs::write(dir.path().join("family.json"), "not json")
            .await
            .unwrap();

        let err = store.get(Persona::Family).await.unwrap_err();
        assert!(matches!(err, ConfigStoreError::DeserializationFailed(_)));
    }

    #[tokio::test]
    async fn no_temp_file_left_after_write() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path());

        store
            .put(Persona::Family, &shipped_config(Persona::Family))
            .await
            .unwrap();
        assert!(!dir.path().join(".family.json.tmp").exists());
    }
}
