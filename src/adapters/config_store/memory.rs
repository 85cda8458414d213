//! In-memory prompt config store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::Persona;
use crate::domain::prompt::PromptConfig;
use crate::ports::{ConfigStoreError, PromptConfigStore};

/// In-memory implementation of the prompt config store.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    configs: Mutex<HashMap<Persona, PromptConfig>>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored overrides.
    pub fn len(&self) -> usize {
        self.configs.lock().unwrap().len()
    }

    /// Returns true if no overrides are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PromptConfigStore for InMemoryConfigStore {
    async fn get(&self, persona: Persona) -> Result<Option<PromptConfig>, ConfigStoreError> {
        Ok(self.configs.lock().unwrap().get(&persona).cloned())
    }

    async fn put(&self, persona: Persona, config: &PromptConfig) -> Result<(), ConfigStoreError> {
        self.configs.lock().unwrap().insert(persona, config.clone());
        Ok(())
    }

    async fn delete(&self, persona: Persona) -> Result<(), ConfigStoreError> {
        self.configs.lock().unwrap().remove(&persona);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::shipped_config;

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let store = InMemoryConfigStore::new();
        assert!(store.get(Persona::Family).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryConfigStore::new();
        let config = shipped_config(Persona::Caregiver);

        store.put(Persona::Caregiver, &config).await.unwrap();
        let loaded = store.get(Persona::Caregiver).await.unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let store = InMemoryConfigStore::new();
        store
            .put(Persona::Family, &shipped_config(Persona::Family))
            .await
            .unwrap();

        store.delete(Persona::Family).await.unwrap();
        assert!(store.get(Persona::Family).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_key_is_noop() {
        let store = InMemoryConfigStore::new();
        assert!(store.delete(Persona::Kindergarten).await.is_ok());
    }

    #[tokio::test]
    async fn personas_are_isolated() {
        let store = InMemoryConfigStore::new();
        store
            .put(Persona::Family, &shipped_config(Persona::Family))
            .await
            .unwrap();

        assert!(store.get(Persona::Caregiver).await.unwrap().is_none());
    }
}
