//! User feedback records for report sections.
//!
//! A `FeedbackLog` is written once per rating event and never updated.
//! Optional fields that are absent are omitted from serialization entirely;
//! the document store rejects explicit-null fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User rating of a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Bad,
}

/// One user rating event. Immutable once written; only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackLog {
    /// The user who rated.
    pub user_id: String,
    /// The report section the rating targets.
    pub section: String,
    /// The rating itself.
    pub rating: Rating,
    /// Reason tags, populated only when the rating is bad.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_tags: Option<Vec<String>>,
    /// Optional free-text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Optional serialized context snapshot from the moment of rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_snapshot: Option<String>,
    /// Creation time, assigned by the store on append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FeedbackLog {
    /// Creates a good rating for a section.
    pub fn good(user_id: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            section: section.into(),
            rating: Rating::Good,
            reason_tags: None,
            comment: None,
            context_snapshot: None,
            created_at: None,
        }
    }

    /// Creates a bad rating for a section, with reason tags.
    pub fn bad(
        user_id: impl Into<String>,
        section: impl Into<String>,
        reason_tags: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            section: section.into(),
            rating: Rating::Bad,
            reason_tags: Some(reason_tags),
            comment: None,
            context_snapshot: None,
            created_at: None,
        }
    }

    /// Attaches a free-text comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attaches a serialized context snapshot.
    pub fn with_context_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.context_snapshot = Some(snapshot.into());
        self
    }
}
