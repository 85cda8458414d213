//! Integration tests for the analysis lifecycle.
//!
//! These tests verify the end-to-end flow through the public API:
//! 1. Primary analysis: config assembly, structured dispatch, contract
//!    parsing, local duration stamping
//! 2. Derived analyses: prompt construction and freeform routing
//! 3. Anchored chat with graceful degradation
//! 4. Prompt config reconciliation and feedback caching around the same
//!    orchestrator
//!
//! Uses the in-memory adapters to test the flow without external services.

use std::sync::Arc;

use serde_json::json;

use care_lens::adapters::ai::{MockFailure, MockModel};
use care_lens::adapters::config_store::InMemoryConfigStore;
use care_lens::adapters::feedback::InMemoryFeedbackStore;
use care_lens::application::{
    AnalysisError, AnalysisOrchestrator, FeedbackCache, PersonaConfigurationStore,
};
use care_lens::domain::analysis::{
    response_schema, AnalysisResult, DerivedOptions, InterventionFocus, InterventionMethod,
    INTERVENTION_PLAN_HEADINGS,
};
use care_lens::domain::chat::{ChatMessage, FALLBACK_REPLY};
use care_lens::domain::feedback::FeedbackLog;
use care_lens::domain::foundation::Persona;
use care_lens::domain::prompt::{shipped_config, PromptBody, SHIPPED_VERSION};
use care_lens::ports::{MediaAsset, PromptConfigStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A complete model response covering all six required sections.
fn report_json() -> serde_json::Value {
    json!({
        "executive_summary": {
            "overview": "A warm mealtime with two brief escalations.",
            "timeline": [
                {"time": "00:30", "event": "Child refuses the spoon"},
                {"time": "03:10", "event": "Caregiver offers a choice of bowls"}
            ],
            "scores": {"safety": 9, "climate": 6, "interaction": 7}
        },
        "resource_audit": {
            "personnel": "One caregiver present throughout.",
            "equipment": "Child-sized table and cutlery.",
            "learning_materials": "None visible during the meal.",
            "space_utilization": "Eating area clearly delimited.",
            "safety_provisions": "High chair straps fastened.",
            "emotional_support": "Caregiver stays at eye level."
        },
        "developmental_milestone": {
            "observed_activity": "Self-feeding with a spoon",
            "emotional_state": "Frustrated, then engaged",
            "expected_milestone": "Uses a spoon with some spilling",
            "verdict": "meets",
            "analysis": "Self-feeding persistence is age-appropriate."
        },
        "environmental_scan": {
            "sensory_load": "Low: quiet room, natural light.",
            "layout_analysis": "Table placed away from foot traffic."
        },
        "recommendations": {
            "keep": [{
                "category": "autonomy",
                "action": "Offering limited choices",
                "justification": "Defused the second escalation."
            }],
            "improve": [{
                "category": "pacing",
                "action": "Slow down between bites",
                "justification": "Child signaled fullness twice.",
                "urgency": "low"
            }]
        },
        "stakeholder_specifics": {
            "director": {
                "note": "Mealtime practice is solid.",
                "justification": "Consistent with prior observations.",
                "immediate_action": "None required."
            },
            "parents": {
                "note": "Your child is developing eating independence.",
                "justification": "Persisted through frustration."
            },
            "authority": {
                "note": "Meal supervision meets expectations.",
                "justification": "Continuous adult presence."
            }
        }
    })
}

fn parsed_report() -> AnalysisResult {
    serde_json::from_value(report_json()).expect("fixture must parse")
}

fn clip() -> MediaAsset {
    MediaAsset::new(vec![0x66, 0x74, 0x79, 0x70], "video/mp4")
}

fn build(model: &MockModel) -> (AnalysisOrchestrator, PersonaConfigurationStore) {
    let configs = PersonaConfigurationStore::new(Arc::new(InMemoryConfigStore::new()));
    let orchestrator = AnalysisOrchestrator::new(Arc::new(model.clone()), configs.clone());
    (orchestrator, configs)
}

// =============================================================================
// Primary Analysis
// =============================================================================

#[tokio::test]
async fn primary_analysis_end_to_end() {
    let model = MockModel::new().with_structured_response(report_json().to_string());
    let (orchestrator, _) = build(&model);

    let result = orchestrator
        .run_primary_analysis(clip(), Persona::Family)
        .await
        .unwrap();

    assert!(result.duration_seconds >= 0.0);
    assert_eq!(
        result.executive_summary.overview,
        "A warm mealtime with two brief escalations."
    );
    assert_eq!(result.executive_summary.scores.climate, 6);
    assert_eq!(result.recommendations.improve[0].urgency, "low");

    // Exactly one structured call carrying the media and the full schema.
    let calls = model.structured_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].media.mime_type, "video/mp4");
    assert_eq!(calls[0].schema, response_schema());
}

#[tokio::test]
async fn primary_analysis_strips_markdown_fences() {
    let fenced = format!("```json\n{}\n```", report_json());
    let model = MockModel::new().with_structured_response(fenced);
    let (orchestrator, _) = build(&model);

    let result = orchestrator
        .run_primary_analysis(clip(), Persona::Caregiver)
        .await
        .unwrap();
    assert_eq!(result.developmental_milestone.verdict, "meets");
}

#[tokio::test]
async fn primary_analysis_reports_missing_section_as_schema_violation() {
    let mut incomplete = report_json();
    incomplete
        .as_object_mut()
        .unwrap()
        .remove("stakeholder_specifics");

    let model = MockModel::new().with_structured_response(incomplete.to_string());
    let (orchestrator, _) = build(&model);

    let err = orchestrator
        .run_primary_analysis(clip(), Persona::Family)
        .await
        .unwrap_err();

    match err {
        AnalysisError::SchemaViolation { missing } => {
            assert_eq!(missing, vec!["stakeholder_specifics".to_string()]);
        }
        other => panic!("expected SchemaViolation, got {:?}", other),
    }
}

#[tokio::test]
async fn primary_analysis_reports_unparseable_text_as_malformed() {
    let model = MockModel::new().with_structured_response("I could not analyze this video.");
    let (orchestrator, _) = build(&model);

    let err = orchestrator
        .run_primary_analysis(clip(), Persona::Family)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
}

#[tokio::test]
async fn primary_analysis_uses_saved_override_prompt() {
    let model = MockModel::new().with_structured_response(report_json().to_string());
    let (orchestrator, configs) = build(&model);

    let mut config = shipped_config(Persona::Family);
    config.body = PromptBody::Unified("Focus exclusively on mealtime routines.".to_string());
    config.keywords.insert("mealtime".to_string());
    configs.save(Persona::Family, config).await.unwrap();

    orchestrator
        .run_primary_analysis(clip(), Persona::Family)
        .await
        .unwrap();

    let prompt = &model.structured_calls()[0].prompt;
    assert!(prompt.contains("Focus exclusively on mealtime routines."));
    assert!(prompt.contains("mealtime"));
}

#[tokio::test]
async fn primary_analysis_falls_back_to_shipped_after_stale_override() {
    let model = MockModel::new().with_structured_response(report_json().to_string());
    let store = Arc::new(InMemoryConfigStore::new());
    let configs = PersonaConfigurationStore::new(store.clone());
    let orchestrator = AnalysisOrchestrator::new(Arc::new(model.clone()), configs);

    let mut stale = shipped_config(Persona::Kindergarten);
    stale.version = SHIPPED_VERSION - 1;
    stale.body = PromptBody::Unified("Outdated prompt.".to_string());
    store.put(Persona::Kindergarten, &stale).await.unwrap();

    orchestrator
        .run_primary_analysis(clip(), Persona::Kindergarten)
        .await
        .unwrap();

    let prompt = &model.structured_calls()[0].prompt;
    assert!(!prompt.contains("Outdated prompt."));
    // The stale override was deleted on load.
    assert!(store.get(Persona::Kindergarten).await.unwrap().is_none());
}

// =============================================================================
// Derived Analyses
// =============================================================================

#[tokio::test]
async fn intervention_plan_routes_as_freeform_with_framework_and_headings() {
    let model = MockModel::new().with_freeform_response("## Goals\n...");
    let (orchestrator, _) = build(&model);

    let text = orchestrator
        .run_derived_analysis(
            "intervention_plan",
            Persona::Caregiver,
            &parsed_report(),
            &DerivedOptions::intervention(InterventionMethod::Cbt, InterventionFocus::Cognitive),
        )
        .await
        .unwrap();
    assert_eq!(text, "## Goals\n...");

    // Routed as free text, never through the structured contract.
    assert!(model.structured_calls().is_empty());
    assert_eq!(model.freeform_calls().len(), 1);

    let call = &model.freeform_calls()[0];
    assert!(call.prompt.contains(InterventionMethod::Cbt.description()));
    for heading in INTERVENTION_PLAN_HEADINGS {
        assert!(call.prompt.contains(heading), "missing heading {}", heading);
    }
    // The persona config's sensitivity rides along for safety mapping.
    assert_eq!(
        call.sensitivity,
        Some(shipped_config(Persona::Caregiver).sensitivity.value())
    );
}

#[tokio::test]
async fn derived_analysis_grounds_on_the_prior_report() {
    let model = MockModel::new().with_freeform_response("analysis");
    let (orchestrator, _) = build(&model);

    orchestrator
        .run_derived_analysis(
            "participant_analysis",
            Persona::Family,
            &parsed_report(),
            &DerivedOptions::default(),
        )
        .await
        .unwrap();

    let prompt = &model.freeform_calls()[0].prompt;
    assert!(prompt.contains("A warm mealtime with two brief escalations."));
}

#[tokio::test]
async fn unknown_kind_fails_before_any_model_call() {
    let model = MockModel::new();
    let (orchestrator, _) = build(&model);

    let err = orchestrator
        .run_derived_analysis(
            "sentiment_report",
            Persona::Family,
            &parsed_report(),
            &DerivedOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidKind(kind) if kind == "sentiment_report"));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn incomplete_options_fail_before_any_model_call() {
    let model = MockModel::new();
    let (orchestrator, _) = build(&model);

    let err = orchestrator
        .run_derived_analysis(
            "custom_plan",
            Persona::Family,
            &parsed_report(),
            &DerivedOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidRequest(_)));
    assert_eq!(model.call_count(), 0);
}

// =============================================================================
// Anchored Chat
// =============================================================================

#[tokio::test]
async fn chat_turn_is_anchored_to_the_report() {
    let model = MockModel::new().with_converse_response("The climate dipped at 00:30.");
    let (orchestrator, _) = build(&model);
    let report = parsed_report();

    let history = vec![
        ChatMessage::user("What stood out?"),
        ChatMessage::model("The choice of bowls defused the tension."),
    ];
    let reply = orchestrator
        .run_chat_turn(Persona::Family, &history, "Why is climate only 6?", &report)
        .await;

    assert_eq!(reply, "The climate dipped at 00:30.");

    let turns = &model.converse_calls()[0].turns;
    assert!(turns[1].content.contains("A warm mealtime"));
    assert_eq!(turns[turns.len() - 2].content, history[1].content);
    assert_eq!(turns.last().unwrap().content, "Why is climate only 6?");
}

#[tokio::test]
async fn chat_turn_never_surfaces_model_errors() {
    let model = MockModel::new().with_converse_error(MockFailure::RateLimited {
        retry_after_secs: 30,
    });
    let (orchestrator, _) = build(&model);

    let reply = orchestrator
        .run_chat_turn(Persona::Caregiver, &[], "hello", &parsed_report())
        .await;
    assert_eq!(reply, FALLBACK_REPLY);
}

// =============================================================================
// Feedback Cache
// =============================================================================

#[tokio::test]
async fn feedback_flows_through_the_cache() {
    let store = Arc::new(InMemoryFeedbackStore::new());
    let cache = FeedbackCache::new(store.clone());

    cache
        .record(FeedbackLog::good("user-1", "executive_summary"))
        .await
        .unwrap();
    cache
        .record(
            FeedbackLog::bad("user-2", "recommendations", vec!["too_generic".to_string()])
                .with_comment("Advice did not match the clip."),
        )
        .await
        .unwrap();

    let entries = cache.list(false).await.unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first.
    assert_eq!(entries[0].user_id, "user-2");

    // A second read within the freshness window is served from the cache.
    let again = cache.list(false).await.unwrap();
    assert!(Arc::ptr_eq(&entries, &again));
    assert_eq!(store.fetch_count(), 1);
}
