//! Follow-up analyses derived from a completed structured report.
//!
//! A derived analysis is a free-text document produced by re-prompting the
//! model with the structured analysis embedded as grounding context. No
//! structured-schema contract is applied to these calls; they are narrative
//! documents, not structured records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::result::AnalysisResult;

/// The fixed set of derived-analysis kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedAnalysisKind {
    /// Deep-dive on one participant in the interaction.
    ParticipantAnalysis,
    /// A structured intervention plan built on a named clinical framework.
    InterventionPlan,
    /// A plan shaped by the user's own free-text instructions.
    CustomPlan,
}

impl DerivedAnalysisKind {
    /// Stable wire name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedAnalysisKind::ParticipantAnalysis => "participant_analysis",
            DerivedAnalysisKind::InterventionPlan => "intervention_plan",
            DerivedAnalysisKind::CustomPlan => "custom_plan",
        }
    }
}

impl fmt::Display for DerivedAnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DerivedAnalysisKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "participant_analysis" => Ok(DerivedAnalysisKind::ParticipantAnalysis),
            "intervention_plan" => Ok(DerivedAnalysisKind::InterventionPlan),
            "custom_plan" => Ok(DerivedAnalysisKind::CustomPlan),
            other => Err(ValidationError::invalid_format(
                "kind",
                format!("unknown derived analysis kind '{}'", other),
            )),
        }
    }
}

/// How deep a participant analysis should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantDepth {
    /// The four base analytic dimensions.
    #[default]
    Regular,
    /// Adds environmental and background factors as a fifth dimension.
    Deep,
}

/// The named clinical frameworks an intervention plan can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionMethod {
    /// Cognitive Behavioral Therapy.
    Cbt,
    /// Nonviolent Communication.
    Nvc,
    /// Gottman-style emotion coaching.
    EmotionCoaching,
    /// Adlerian encouragement-focused parenting.
    Adlerian,
}

impl InterventionMethod {
    /// Canonical short description embedded into intervention-plan prompts.
    pub fn description(&self) -> &'static str {
        match self {
            InterventionMethod::Cbt => {
                "CBT (Cognitive Behavioral Therapy): identifies the thought patterns \
                 behind behavior and replaces unhelpful automatic reactions with \
                 deliberate, practiced alternatives."
            }
            InterventionMethod::Nvc => {
                "NVC (Nonviolent Communication): reframes conflict as unmet needs, \
                 using observation, feeling, need, and request instead of blame."
            }
            InterventionMethod::EmotionCoaching => {
                "Emotion Coaching: treats emotional moments as opportunities to \
                 connect, naming the child's feeling before guiding behavior."
            }
            InterventionMethod::Adlerian => {
                "Adlerian approach: builds the child's sense of belonging and \
                 capability through encouragement and natural consequences."
            }
        }
    }

    /// Display name used in plan headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            InterventionMethod::Cbt => "CBT",
            InterventionMethod::Nvc => "NVC",
            InterventionMethod::EmotionCoaching => "Emotion Coaching",
            InterventionMethod::Adlerian => "Adlerian",
        }
    }
}

impl FromStr for InterventionMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CBT" | "cbt" => Ok(InterventionMethod::Cbt),
            "NVC" | "nvc" => Ok(InterventionMethod::Nvc),
            "emotion_coaching" => Ok(InterventionMethod::EmotionCoaching),
            "adlerian" => Ok(InterventionMethod::Adlerian),
            other => Err(ValidationError::invalid_format(
                "method",
                format!("unknown intervention method '{}'", other),
            )),
        }
    }
}

/// Whether an intervention plan targets feelings or understanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionFocus {
    Emotional,
    Cognitive,
}

impl InterventionFocus {
    fn as_str(&self) -> &'static str {
        match self {
            InterventionFocus::Emotional => "emotional",
            InterventionFocus::Cognitive => "cognitive",
        }
    }
}

/// Options supplied with a derived-analysis request.
///
/// Which fields are consulted depends on the kind: participant analysis
/// reads `depth`, intervention plans require `method` and `focus`, custom
/// plans require `custom_instructions`.
#[derive(Debug, Clone, Default)]
pub struct DerivedOptions {
    pub depth: Option<ParticipantDepth>,
    pub method: Option<InterventionMethod>,
    pub focus: Option<InterventionFocus>,
    pub custom_instructions: Option<String>,
}

impl DerivedOptions {
    /// Options for a participant analysis.
    pub fn participant(depth: ParticipantDepth) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// Options for an intervention plan.
    pub fn intervention(method: InterventionMethod, focus: InterventionFocus) -> Self {
        Self {
            method: Some(method),
            focus: Some(focus),
            ..Self::default()
        }
    }

    /// Options for a custom plan.
    pub fn custom(instructions: impl Into<String>) -> Self {
        Self {
            custom_instructions: Some(instructions.into()),
            ..Self::default()
        }
    }
}

/// The six fixed structural headings of an intervention plan.
pub const INTERVENTION_PLAN_HEADINGS: [&str; 6] = [
    "Goals",
    "Current State Summary",
    "Guiding Principles",
    "Three-Phase Action Plan",
    "Practical Tools",
    "Closing Invitation",
];

const BASE_DIMENSIONS: [&str; 4] = [
    "verbal content",
    "non-verbal cues",
    "emotional context",
    "inter-party dynamics",
];

const DEEP_DIMENSION: &str = "environmental and background factors";

/// Serializes the prior report as the grounding block every derived prompt
/// carries.
fn grounding_block(prior: &AnalysisResult) -> String {
    // Serialization of a value that already round-trips cannot fail.
    let snapshot = serde_json::to_string_pretty(prior).unwrap_or_default();
    format!(
        "The following structured analysis of the recorded interaction is the \
         grounding context for this request:\n\n{}",
        snapshot
    )
}

/// Builds the free-text prompt for a participant deep-dive.
pub fn participant_prompt(prior: &AnalysisResult, depth: ParticipantDepth) -> String {
    let mut dimensions: Vec<&str> = BASE_DIMENSIONS.to_vec();
    if depth == ParticipantDepth::Deep {
        dimensions.push(DEEP_DIMENSION);
    }

    format!(
        "{}\n\nWrite a focused analysis of each participant in the interaction. \
         Cover these analytic dimensions: {}.\n\
         Keep the tone professional and specific to the observed material.",
        grounding_block(prior),
        dimensions.join(", ")
    )
}

/// Builds the free-text prompt for an intervention plan.
pub fn intervention_prompt(
    prior: &AnalysisResult,
    method: InterventionMethod,
    focus: InterventionFocus,
) -> String {
    let headings = INTERVENTION_PLAN_HEADINGS
        .iter()
        .enumerate()
        .map(|(i, heading)| format!("{}. {}", i + 1, heading))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nBuild an intervention plan using the {} framework.\n\
         Framework summary: {}\n\
         Primary focus: the {} dimension of the interaction.\n\n\
         Structure the plan under exactly these headings:\n{}",
        grounding_block(prior),
        method.display_name(),
        method.description(),
        focus.as_str(),
        headings
    )
}

/// Builds the free-text prompt for a custom plan.
///
/// The user's instructions are embedded verbatim; no canonical method
/// description is injected.
pub fn custom_prompt(prior: &AnalysisResult, instructions: &str) -> String {
    format!(
        "{}\n\nFollow the user's instructions below when writing the plan:\n\n{}",
        grounding_block(prior),
        instructions
    )
}

#[cfg(test)]
mod tests {
    use super::super::result::fixtures::sample_result;
    use super::*;

    #[test]
    fn kind_parses_wire_names() {
        assert_eq!(
            "participant_analysis".parse::<DerivedAnalysisKind>().unwrap(),
            DerivedAnalysisKind::ParticipantAnalysis
        );
        assert_eq!(
            "intervention_plan".parse::<DerivedAnalysisKind>().unwrap(),
            DerivedAnalysisKind::InterventionPlan
        );
        assert_eq!(
            "custom_plan".parse::<DerivedAnalysisKind>().unwrap(),
            DerivedAnalysisKind::CustomPlan
        );
    }

    #[test]
    fn kind_rejects_unknown_names() {
        assert!("unknown_kind".parse::<DerivedAnalysisKind>().is_err());
    }

    #[test]
    fn kind_round_trips_through_as_str() {
        for kind in [
            DerivedAnalysisKind::ParticipantAnalysis,
            DerivedAnalysisKind::InterventionPlan,
            DerivedAnalysisKind::CustomPlan,
        ] {
            assert_eq!(kind.as_str().parse::<DerivedAnalysisKind>().unwrap(), kind);
        }
    }

    #[test]
    fn method_parses_common_spellings() {
        assert_eq!("CBT".parse::<InterventionMethod>().unwrap(), InterventionMethod::Cbt);
        assert_eq!("cbt".parse::<InterventionMethod>().unwrap(), InterventionMethod::Cbt);
        assert_eq!(
            "emotion_coaching".parse::<InterventionMethod>().unwrap(),
            InterventionMethod::EmotionCoaching
        );
    }

    #[test]
    fn every_method_has_a_description() {
        for method in [
            InterventionMethod::Cbt,
            InterventionMethod::Nvc,
            InterventionMethod::EmotionCoaching,
            InterventionMethod::Adlerian,
        ] {
            assert!(!method.description().is_empty());
            assert!(method
                .description()
                .starts_with(method.display_name().split(' ').next().unwrap()));
        }
    }

    #[test]
    fn participant_prompt_embeds_prior_result() {
        let prior = sample_result();
        let prompt = participant_prompt(&prior, ParticipantDepth::Regular);

        assert!(prompt.contains("grounding context"));
        assert!(prompt.contains(&prior.executive_summary.overview));
    }

    #[test]
    fn regular_depth_covers_four_dimensions() {
        let prompt = participant_prompt(&sample_result(), ParticipantDepth::Regular);

        for dimension in BASE_DIMENSIONS {
            assert!(prompt.contains(dimension));
        }
        assert!(!prompt.contains(DEEP_DIMENSION));
    }

    #[test]
    fn deep_depth_adds_environmental_dimension() {
        let prompt = participant_prompt(&sample_result(), ParticipantDepth::Deep);
        assert!(prompt.contains(DEEP_DIMENSION));
    }

    #[test]
    fn intervention_prompt_embeds_method_description_and_headings() {
        let prompt = intervention_prompt(
            &sample_result(),
            InterventionMethod::Cbt,
            InterventionFocus::Emotional,
        );

        assert!(prompt.contains(InterventionMethod::Cbt.description()));
        assert!(prompt.contains("emotional"));
        for heading in INTERVENTION_PLAN_HEADINGS {
            assert!(prompt.contains(heading), "missing heading {}", heading);
        }
    }

    #[test]
    fn custom_prompt_embeds_instructions_verbatim() {
        let instructions = "Write the plan as a letter to the caregiver, in short sentences.";
        let prompt = custom_prompt(&sample_result(), instructions);

        assert!(prompt.contains(instructions));
        // No canonical method description is injected for custom plans.
        assert!(!prompt.contains(InterventionMethod::Cbt.description()));
    }
}
