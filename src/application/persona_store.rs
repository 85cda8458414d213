//! Persona configuration service.
//!
//! Resolves the active prompt/keyword/sensitivity bundle for a persona,
//! reconciling shipped defaults against the user's local override.
//!
//! The reconciliation rule is version-based: an override is trusted when
//! its version is `>=` the shipped default's version. The comparison is
//! deliberately not strict, so user edits made at the current version are
//! never silently discarded. A stale override (version below shipped) is
//! deleted on load so it cannot resurface.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::Persona;
use crate::domain::prompt::{
    shipped_config, shipped_section, PromptBody, PromptConfig, PromptSection, SHIPPED_VERSION,
};
use crate::ports::{ConfigStoreError, PromptConfigStore};

/// Service resolving and persisting per-persona prompt configurations.
#[derive(Clone)]
pub struct PersonaConfigurationStore {
    store: Arc<dyn PromptConfigStore>,
}

impl PersonaConfigurationStore {
    /// Creates the service over a config store port.
    pub fn new(store: Arc<dyn PromptConfigStore>) -> Self {
        Self { store }
    }

    /// Resolves the active config for a persona.
    ///
    /// Returns the local override when one exists and its version is at
    /// least the shipped version; otherwise returns a fresh copy of the
    /// shipped default. A stale override is deleted as a side effect.
    pub async fn load(&self, persona: Persona) -> Result<PromptConfig, ConfigStoreError> {
        match self.store.get(persona).await? {
            Some(config) if config.version >= SHIPPED_VERSION => Ok(config),
            Some(stale) => {
                tracing::debug!(
                    persona = %persona,
                    stale_version = stale.version,
                    shipped_version = SHIPPED_VERSION,
                    "discarding stale prompt override"
                );
                self.store.delete(persona).await?;
                Ok(shipped_config(persona))
            }
            None => Ok(shipped_config(persona)),
        }
    }

    /// Persists a config as the persona's override.
    ///
    /// The caller controls the version; `updated_at` is refreshed here.
    /// A subsequent `load` returns an identical config until changed again.
    pub async fn save(
        &self,
        persona: Persona,
        mut config: PromptConfig,
    ) -> Result<PromptConfig, ConfigStoreError> {
        config.updated_at = Utc::now();
        self.store.put(persona, &config).await?;
        Ok(config)
    }

    /// Replaces one section of the current config with the shipped
    /// default's value for that section.
    ///
    /// Other sections, keywords, and sensitivity are untouched. The result
    /// is returned unsaved; it becomes durable only through `save`. A
    /// unified body has no per-section content to preserve, so it is
    /// expanded to the shipped default's section map first.
    pub async fn reset_section(
        &self,
        persona: Persona,
        section: PromptSection,
    ) -> Result<PromptConfig, ConfigStoreError> {
        let mut config = self.load(persona).await?;

        let mut sections = match config.body {
            PromptBody::Sectioned(sections) => sections,
            PromptBody::Unified(_) => PromptSection::all()
                .iter()
                .map(|s| (*s, shipped_section(persona, *s)))
                .collect::<BTreeMap<_, _>>(),
        };
        sections.insert(section, shipped_section(persona, section));
        config.body = PromptBody::Sectioned(sections);

        Ok(config)
    }

    /// Discards the override entirely and returns the shipped default.
    pub async fn reset_all(&self, persona: Persona) -> Result<PromptConfig, ConfigStoreError> {
        self.store.delete(persona).await?;
        Ok(shipped_config(persona))
    }
}
