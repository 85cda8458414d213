//! The canonical structured analysis report.
//!
//! `AnalysisResult` is the shape the generative model is contractually
//! required to produce for a primary analysis. Six top-level sections are
//! required in the model's response; `duration_seconds` is appended locally
//! after receipt and is never requested from the model.

use serde::{Deserialize, Serialize};

/// A timestamped event in the clip, as observed by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Position in the clip, e.g. "01:24".
    pub time: String,
    /// What happened at that moment.
    pub event: String,
}

/// Numeric assessment scores, each on a fixed 1-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Physical safety of the observed setting.
    pub safety: u8,
    /// Emotional climate of the interaction.
    pub climate: u8,
    /// Quality of adult-child interaction.
    pub interaction: u8,
}

/// Overview of the clip with a timeline and headline scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Free-text overview of the interaction.
    pub overview: String,
    /// Ordered list of notable moments.
    pub timeline: Vec<TimelineEvent>,
    /// Headline assessment scores.
    pub scores: Scores,
}

/// Audit of the resources visible in the clip, by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAudit {
    /// Adults present and their roles.
    pub personnel: String,
    /// Equipment available and in use.
    pub equipment: String,
    /// Books, toys, and learning materials.
    pub learning_materials: String,
    /// How the physical space is used.
    pub space_utilization: String,
    /// Safety provisions in place or missing.
    pub safety_provisions: String,
    /// Emotional support resources available to the child.
    pub emotional_support: String,
}

/// One developmental-milestone assessment for the observed child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentalMilestone {
    /// The activity the child was observed doing.
    pub observed_activity: String,
    /// The child's emotional state during the activity.
    pub emotional_state: String,
    /// The milestone expected at this developmental stage.
    pub expected_milestone: String,
    /// Whether the observation meets, exceeds, or lags the milestone.
    pub verdict: String,
    /// The model's reasoning for the verdict.
    pub analysis: String,
}

/// Scan of the environment the interaction takes place in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalScan {
    /// Noise, light, and stimulus load on the child.
    pub sensory_load: String,
    /// How the room layout supports or hinders the activity.
    pub layout_analysis: String,
}

/// A practice worth preserving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepRecommendation {
    /// Area the recommendation applies to.
    pub category: String,
    /// The behavior or practice to keep.
    pub action: String,
    /// Why it is worth keeping.
    pub justification: String,
    /// Optional observed sentiment that motivated this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

/// A concrete do/say model for correcting a problematic moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionModel {
    /// What the adult should do instead.
    pub what_to_do: String,
    /// What the adult should say instead.
    pub what_to_say: String,
}

/// An activity suggested as an emotional-response outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalResponseActivity {
    /// Short name of the activity.
    pub name: String,
    /// How to run it.
    pub description: String,
}

/// A practice that should change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImproveRecommendation {
    /// Area the recommendation applies to.
    pub category: String,
    /// The change to make.
    pub action: String,
    /// Why the change matters.
    pub justification: String,
    /// How urgent the change is.
    pub urgency: String,
    /// Optional observed sentiment that motivated this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    /// Optional concrete do/say correction for the observed moment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_model: Option<CorrectionModel>,
    /// Optional activities that channel the child's emotional response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_response_activities: Option<Vec<EmotionalResponseActivity>>,
}

/// Keep/improve recommendation lists, both ordered by importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Practices to preserve.
    pub keep: Vec<KeepRecommendation>,
    /// Practices to change.
    pub improve: Vec<ImproveRecommendation>,
}

/// A note aimed at one stakeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderNote {
    /// The note itself.
    pub note: String,
    /// Why this stakeholder should care.
    pub justification: String,
}

/// A note for the institution's director, with an action item attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorNote {
    /// The note itself.
    pub note: String,
    /// Why the director should care.
    pub justification: String,
    /// The one thing to do right away.
    pub immediate_action: String,
}

/// Stakeholder-specific notes for the three report audiences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderSpecifics {
    /// Note for the institution's director.
    pub director: DirectorNote,
    /// Note for the child's parents.
    pub parents: StakeholderNote,
    /// Note for the supervising authority.
    pub authority: StakeholderNote,
}

/// The canonical structured report for a primary analysis.
///
/// All sections other than `duration_seconds` come from the model;
/// `duration_seconds` is measured and attached by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overview, timeline, and headline scores.
    pub executive_summary: ExecutiveSummary,
    /// Resource audit by category.
    pub resource_audit: ResourceAudit,
    /// One developmental-milestone assessment.
    pub developmental_milestone: DevelopmentalMilestone,
    /// Environmental scan.
    pub environmental_scan: EnvironmentalScan,
    /// Keep/improve recommendations.
    pub recommendations: Recommendations,
    /// Per-stakeholder notes.
    pub stakeholder_specifics: StakeholderSpecifics,
    /// Elapsed processing time in seconds, attached after receipt.
    #[serde(default)]
    pub duration_seconds: f64,
}

impl AnalysisResult {
    /// The six top-level keys the model must include in its response.
    pub const REQUIRED_SECTIONS: [&'static str; 6] = [
        "executive_summary",
        "resource_audit",
        "developmental_milestone",
        "environmental_scan",
        "recommendations",
        "stakeholder_specifics",
    ];
}
