//! The three fixed audience profiles a report is written for.
//!
//! Persona selects prompt content, keyword emphasis, and the tone of every
//! generated document. It is a closed enumeration so that persona-specific
//! behavior is always an exhaustive match: adding or removing a persona is
//! a compile-time-checked change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Audience profile for analysis and prompt selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// A family watching over their own child.
    Family,
    /// A professional caregiver (nanny, babysitter).
    Caregiver,
    /// An institution or kindergarten setting.
    Kindergarten,
}

impl Persona {
    /// All personas, in display order.
    pub fn all() -> [Persona; 3] {
        [Persona::Family, Persona::Caregiver, Persona::Kindergarten]
    }

    /// Stable key used for local config storage.
    pub fn as_key(&self) -> &'static str {
        match self {
            Persona::Family => "family",
            Persona::Caregiver => "caregiver",
            Persona::Kindergarten => "kindergarten",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for Persona {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family" => Ok(Persona::Family),
            "caregiver" => Ok(Persona::Caregiver),
            "kindergarten" => Ok(Persona::Kindergarten),
            other => Err(ValidationError::invalid_format(
                "persona",
                format!("unknown persona '{}'", other),
            )),
        }
    }
}
