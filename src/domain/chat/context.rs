//! Anchored conversational context for report follow-up chat.
//!
//! Every chat exchange is grounded by a fixed anchor: the assistant's
//! system identity followed by a serialized snapshot of the report under
//! discussion. The anchor always precedes historical turns, which always
//! precede the new message, so the model's effective context order is
//! invariant across calls.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisResult;
use crate::domain::foundation::Persona;

/// Role of a conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The human user.
    User,
    /// The assistant model.
    Model,
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this turn.
    pub role: ChatRole,
    /// Turn content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new turn.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates a model turn.
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, content)
    }
}

/// Fixed reply returned when the model call fails mid-conversation.
///
/// The chat path deliberately degrades to this apology instead of surfacing
/// a raw error, because it sits directly inside a live conversation UI.
pub const FALLBACK_REPLY: &str =
    "סליחה, נתקלתי בבעיה זמנית. אפשר לנסות לשאול שוב בעוד רגע?";

/// Builds the bounded turn sequence for a chat exchange.
#[derive(Debug, Clone, Copy)]
pub struct ChatContextBuilder {
    persona: Persona,
}

impl ChatContextBuilder {
    /// Creates a builder for the given persona.
    pub fn new(persona: Persona) -> Self {
        Self { persona }
    }

    /// Builds the full ordered context: anchor, history, then new message.
    pub fn build(
        &self,
        anchor: &AnalysisResult,
        history: &[ChatMessage],
        message: &str,
    ) -> Vec<ChatMessage> {
        let mut turns = Vec::with_capacity(history.len() + 3);

        turns.push(ChatMessage::user(self.identity_block()));
        turns.push(ChatMessage::user(anchor_block(anchor)));
        turns.extend_from_slice(history);
        turns.push(ChatMessage::user(message));

        turns
    }

    /// The persona system identity block that opens every context.
    fn identity_block(&self) -> String {
        let audience = match self.persona {
            Persona::Family => "the child's family",
            Persona::Caregiver => "a professional caregiver",
            Persona::Kindergarten => "kindergarten staff and management",
        };
        format!(
            "You are the analysis assistant for this report, answering questions \
             from {}. Ground every answer in the report below. If something is \
             not covered by the report, say so rather than guessing.",
            audience
        )
    }
}

/// Serializes the report snapshot embedded at the start of every context.
fn anchor_block(anchor: &AnalysisResult) -> String {
    let snapshot = serde_json::to_string_pretty(anchor).unwrap_or_default();
    format!("Current report:\n\n{}", snapshot)
}
