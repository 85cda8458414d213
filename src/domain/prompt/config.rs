//! Versioned prompt configuration for a persona.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Named sections a sectioned prompt body is composed of.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PromptSection {
    /// Who the analyst persona is and who it writes for.
    Identity,
    /// What to look for, moment by moment.
    ForensicLens,
    /// Developmental-psychology framing.
    Psychology,
    /// Safety review instructions.
    Safety,
}

impl PromptSection {
    /// All sections, in assembly order.
    pub fn all() -> [PromptSection; 4] {
        [
            PromptSection::Identity,
            PromptSection::ForensicLens,
            PromptSection::Psychology,
            PromptSection::Safety,
        ]
    }

    /// Stable identifier used by configuration editors.
    pub fn as_key(&self) -> &'static str {
        match self {
            PromptSection::Identity => "identity",
            PromptSection::ForensicLens => "forensic_lens",
            PromptSection::Psychology => "psychology",
            PromptSection::Safety => "safety",
        }
    }
}

impl fmt::Display for PromptSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Sensitivity level of the analysis, between 1 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitivity(u8);

impl Sensitivity {
    /// Lowest sensitivity.
    pub const MIN: Self = Self(1);

    /// Highest sensitivity.
    pub const MAX: Self = Self(10);

    /// Creates a Sensitivity, clamping into the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 10))
    }

    /// Creates a Sensitivity, returning an error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&value) {
            return Err(ValidationError::out_of_range(
                "sensitivity",
                1,
                10,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(5)
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// The prompt text itself: one unified string, or named sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptBody {
    /// A single prompt string.
    Unified(String),
    /// Named sections assembled in a fixed order.
    Sectioned(BTreeMap<PromptSection, String>),
}

impl PromptBody {
    /// Renders the body into the final prompt text, sections in order.
    pub fn render(&self) -> String {
        match self {
            PromptBody::Unified(text) => text.clone(),
            PromptBody::Sectioned(sections) => PromptSection::all()
                .iter()
                .filter_map(|section| sections.get(section))
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

/// A persona's versioned prompt/keyword/sensitivity bundle.
///
/// Created from shipped defaults, mutated only through explicit user edits
/// in a configuration editor, persisted under a per-persona key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Monotonically increasing config version. A locally stored config is
    /// only usable when its version is >= the shipped default's version.
    pub version: u32,
    /// The prompt text.
    pub body: PromptBody,
    /// Keyword emphasis list, deduplicated and unordered.
    pub keywords: BTreeSet<String>,
    /// Analysis sensitivity.
    pub sensitivity: Sensitivity,
    /// When this config was last saved.
    pub updated_at: DateTime<Utc>,
}

impl PromptConfig {
    /// Renders the effective primary-analysis prompt from this config.
    ///
    /// The keyword emphasis list and sensitivity level are appended after
    /// the body so user edits to the body never displace them.
    pub fn assemble(&self) -> String {
        let mut prompt = self.body.render();

        if !self.keywords.is_empty() {
            let keywords = self
                .keywords
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            prompt.push_str(&format!("\n\nPay particular attention to: {}.", keywords));
        }

        prompt.push_str(&format!(
            "\n\nAnalysis sensitivity level: {} (1 = lenient, 10 = strict).",
            self.sensitivity.value()
        ));

        prompt
    }

    /// Returns the text of a section, if the body is sectioned and has it.
    pub fn section(&self, section: PromptSection) -> Option<&str> {
        match &self.body {
            PromptBody::Unified(_) => None,
            PromptBody::Sectioned(sections) => sections.get(&section).map(String::as_str),
        }
    }
}
