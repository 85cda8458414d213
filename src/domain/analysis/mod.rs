//! Structured analysis reports and the contract that produces them.

mod derived;
mod parser;
mod result;
mod schema;

pub use derived::{
    custom_prompt, intervention_prompt, participant_prompt, DerivedAnalysisKind, DerivedOptions,
    InterventionFocus, InterventionMethod, ParticipantDepth, INTERVENTION_PLAN_HEADINGS,
};
pub use parser::{parse_result, sanitize_response, ParseError};
pub use result::{
    AnalysisResult, CorrectionModel, DevelopmentalMilestone, DirectorNote,
    EmotionalResponseActivity, EnvironmentalScan, ExecutiveSummary, ImproveRecommendation,
    KeepRecommendation, Recommendations, ResourceAudit, Scores, StakeholderNote,
    StakeholderSpecifics, TimelineEvent,
};
pub use schema::{response_schema, SchemaNode};

#[cfg(test)]
pub(crate) use result::fixtures;
