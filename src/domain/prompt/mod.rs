//! Persona prompt configuration: the bundle, its sections, and shipped
//! defaults.

mod config;
mod defaults;

pub use config::{PromptBody, PromptConfig, PromptSection, Sensitivity};
pub use defaults::{shipped_config, shipped_section, SHIPPED_VERSION};
