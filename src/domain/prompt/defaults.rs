//! Shipped default prompt configurations, one per persona.
//!
//! These are the bundles a fresh install starts from and the baseline any
//! local override is reconciled against. Text here changes only together
//! with a `SHIPPED_VERSION` bump; an override whose version is below the
//! shipped version is discarded on load.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::domain::foundation::Persona;

use super::config::{PromptBody, PromptConfig, PromptSection, Sensitivity};

/// Version of the defaults shipped with this build.
pub const SHIPPED_VERSION: u32 = 3;

/// Returns a fresh copy of the shipped default config for a persona.
pub fn shipped_config(persona: Persona) -> PromptConfig {
    let mut sections = BTreeMap::new();
    sections.insert(PromptSection::Identity, identity_section(persona).to_string());
    sections.insert(
        PromptSection::ForensicLens,
        FORENSIC_LENS_SECTION.to_string(),
    );
    sections.insert(PromptSection::Psychology, PSYCHOLOGY_SECTION.to_string());
    sections.insert(PromptSection::Safety, safety_section(persona).to_string());

    PromptConfig {
        version: SHIPPED_VERSION,
        body: PromptBody::Sectioned(sections),
        keywords: keywords(persona).iter().map(|s| s.to_string()).collect(),
        sensitivity: sensitivity(persona),
        // Fixed epoch so two fresh copies compare equal.
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Returns the shipped default text for one section of a persona's config.
pub fn shipped_section(persona: Persona, section: PromptSection) -> String {
    match section {
        PromptSection::Identity => identity_section(persona).to_string(),
        PromptSection::ForensicLens => FORENSIC_LENS_SECTION.to_string(),
        PromptSection::Psychology => PSYCHOLOGY_SECTION.to_string(),
        PromptSection::Safety => safety_section(persona).to_string(),
    }
}

fn identity_section(persona: Persona) -> &'static str {
    match persona {
        Persona::Family => {
            "You are a warm, experienced child-development advisor writing for the \
             child's own family. Address the reader as a concerned parent. Be honest \
             about problems but lead with what is going well."
        }
        Persona::Caregiver => {
            "You are a senior supervisor of professional caregivers writing a \
             practical review for a nanny or babysitter. Be collegial, concrete, \
             and specific about technique."
        }
        Persona::Kindergarten => {
            "You are an early-childhood institutional assessor writing for a \
             kindergarten's staff and management. Use professional terminology and \
             reference group dynamics, ratios, and institutional practice."
        }
    }
}

const FORENSIC_LENS_SECTION: &str =
    "Review the recording moment by moment. Note every transition, every adult \
     instruction, and every child reaction with its timestamp. Distinguish what \
     is directly observed from what is inferred, and say which is which.";

const PSYCHOLOGY_SECTION: &str =
    "Interpret behavior through an attachment-aware developmental lens. Match \
     observed activity against age-typical milestones before judging it. Treat \
     strong emotion as communication, not misbehavior.";

fn safety_section(persona: Persona) -> &'static str {
    match persona {
        Persona::Family | Persona::Caregiver => {
            "Scan the visible environment for physical hazards within the child's \
             reach. Flag anything requiring immediate attention separately from \
             general suggestions."
        }
        Persona::Kindergarten => {
            "Scan the visible environment against institutional safety standards: \
             supervision coverage, equipment state, exit access, and group-size \
             appropriateness. Flag regulatory concerns explicitly."
        }
    }
}

fn keywords(persona: Persona) -> &'static [&'static str] {
    match persona {
        Persona::Family => &["bonding", "routine", "tantrum", "independence"],
        Persona::Caregiver => &["technique", "transitions", "boundaries", "engagement"],
        Persona::Kindergarten => &["supervision", "group dynamics", "ratio", "inclusion"],
    }
}

fn sensitivity(persona: Persona) -> Sensitivity {
    match persona {
        Persona::Family => Sensitivity::new(5),
        Persona::Caregiver => Sensitivity::new(6),
        Persona::Kindergarten => Sensitivity::new(7),
    }
}
