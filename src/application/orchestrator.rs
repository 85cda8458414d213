//! Analysis orchestrator: builds and dispatches model calls.
//!
//! Three entry points cover the whole analysis lifecycle: the primary
//! structured analysis of an uploaded clip, free-text analyses derived
//! from a completed report, and report-anchored chat. The orchestrator
//! holds no per-session state, so it is safe to invoke concurrently for
//! different sessions.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::analysis::{
    custom_prompt, intervention_prompt, parse_result, participant_prompt, response_schema,
    AnalysisResult, DerivedAnalysisKind, DerivedOptions,
};
use crate::domain::chat::{ChatContextBuilder, ChatMessage, FALLBACK_REPLY};
use crate::domain::foundation::Persona;
use crate::ports::{
    ConversationRequest, FreeformRequest, GenerativeModel, MediaAsset, StructuredRequest,
};

use super::error::AnalysisError;
use super::persona_store::PersonaConfigurationStore;

/// Orchestrates primary, derived, and conversational model calls.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    model: Arc<dyn GenerativeModel>,
    configs: PersonaConfigurationStore,
}

impl AnalysisOrchestrator {
    /// Creates an orchestrator over a model port and the persona config
    /// service.
    pub fn new(model: Arc<dyn GenerativeModel>, configs: PersonaConfigurationStore) -> Self {
        Self { model, configs }
    }

    /// Runs the primary structured analysis of a clip.
    ///
    /// Resolves the persona's prompt config, dispatches a single
    /// structured call carrying the response schema and the media payload,
    /// parses the response through the contract layer, and attaches the
    /// elapsed time as `duration_seconds`. One remote call per invocation;
    /// retries are a caller concern.
    pub async fn run_primary_analysis(
        &self,
        asset: MediaAsset,
        persona: Persona,
    ) -> Result<AnalysisResult, AnalysisError> {
        let config = self
            .configs
            .load(persona)
            .await
            .map_err(|source| AnalysisError::ConfigUnavailable { source })?;

        let request = StructuredRequest {
            prompt: config.assemble(),
            media: asset,
            schema: response_schema(),
        };

        tracing::debug!(persona = %persona, "dispatching primary analysis");
        let started = Instant::now();
        let raw = self.model.structured(request).await?;
        let elapsed = started.elapsed();

        let mut result = parse_result(&raw)?;
        result.duration_seconds = elapsed.as_secs_f64();

        tracing::debug!(
            persona = %persona,
            duration_seconds = result.duration_seconds,
            "primary analysis complete"
        );
        Ok(result)
    }

    /// Runs a free-text analysis derived from a completed report.
    ///
    /// The prior result is always embedded as grounding context. No
    /// structured-schema contract is applied; derived analyses are
    /// narrative documents. The persona config's sensitivity rides along
    /// on the request so the adapter can map it onto safety thresholds.
    /// An unrecognized `kind` fails before any model call is made.
    pub async fn run_derived_analysis(
        &self,
        kind: &str,
        persona: Persona,
        prior: &AnalysisResult,
        options: &DerivedOptions,
    ) -> Result<String, AnalysisError> {
        let kind: DerivedAnalysisKind = kind
            .parse()
            .map_err(|_| AnalysisError::InvalidKind(kind.to_string()))?;

        let prompt = match kind {
            DerivedAnalysisKind::ParticipantAnalysis => {
                participant_prompt(prior, options.depth.unwrap_or_default())
            }
            DerivedAnalysisKind::InterventionPlan => {
                let method = options.method.ok_or_else(|| {
                    AnalysisError::InvalidRequest(
                        "intervention_plan requires a method".to_string(),
                    )
                })?;
                let focus = options.focus.ok_or_else(|| {
                    AnalysisError::InvalidRequest("intervention_plan requires a focus".to_string())
                })?;
                intervention_prompt(prior, method, focus)
            }
            DerivedAnalysisKind::CustomPlan => {
                let instructions = options.custom_instructions.as_deref().ok_or_else(|| {
                    AnalysisError::InvalidRequest(
                        "custom_plan requires custom instructions".to_string(),
                    )
                })?;
                custom_prompt(prior, instructions)
            }
        };

        let config = self
            .configs
            .load(persona)
            .await
            .map_err(|source| AnalysisError::ConfigUnavailable { source })?;

        tracing::debug!(kind = %kind, persona = %persona, "dispatching derived analysis");
        let request =
            FreeformRequest::new(prompt).with_sensitivity(config.sensitivity.value());
        let text = self.model.freeform(request).await?;
        Ok(text)
    }

    /// Runs one chat turn anchored to a report.
    ///
    /// Never fails from the caller's perspective: any model failure
    /// degrades to the fixed fallback reply, because this path sits
    /// directly inside a live conversation UI.
    pub async fn run_chat_turn(
        &self,
        persona: Persona,
        history: &[ChatMessage],
        message: &str,
        anchor: &AnalysisResult,
    ) -> String {
        let turns = ChatContextBuilder::new(persona).build(anchor, history, message);

        match self.model.converse(ConversationRequest::new(turns)).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "chat turn failed, returning fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
