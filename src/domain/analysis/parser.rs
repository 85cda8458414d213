//! Repairs and validates raw model text into a typed report.
//!
//! Generative models wrap JSON in fenced code blocks often enough that the
//! contract layer strips one fence before parsing. Validation checks the
//! same required-key list the request schema declares, so a response that
//! parses but drops a section is rejected here instead of surfacing as a
//! confusing deserialization error.

use thiserror::Error;

use super::result::AnalysisResult;
use super::schema::response_schema;

/// Errors produced while turning raw model text into an [`AnalysisResult`].
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The sanitized text is not valid JSON.
    #[error("malformed model response: {detail}")]
    MalformedResponse { detail: String },

    /// The response parsed but required top-level sections are missing.
    #[error("model response violates schema: missing sections {missing:?}")]
    SchemaViolation { missing: Vec<String> },
}

/// Strips a single leading/trailing fenced-code-block marker, if present.
///
/// Handles fences with or without a language tag (` ```json `). Idempotent:
/// sanitizing already-clean text is a no-op.
pub fn sanitize_response(raw: &str) -> String {
    let mut current = raw.trim().to_string();

    // Strip to a fixpoint so the operation is idempotent even on
    // degenerate inputs like stacked fence markers.
    loop {
        let stripped = strip_one_fence(&current);
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

fn strip_one_fence(text: &str) -> String {
    let Some(rest) = text.strip_prefix("```") else {
        return text.to_string();
    };

    // Drop the language tag on the opening fence line, if any.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Parses raw model text into a typed report.
///
/// Applies [`sanitize_response`], parses the text as JSON, then checks the
/// required top-level keys declared by the request schema before
/// deserializing. Pure computation, no I/O.
pub fn parse_result(raw: &str) -> Result<AnalysisResult, ParseError> {
    let clean = sanitize_response(raw);

    let value: serde_json::Value =
        serde_json::from_str(&clean).map_err(|e| ParseError::MalformedResponse {
            detail: e.to_string(),
        })?;

    let object = value
        .as_object()
        .ok_or_else(|| ParseError::MalformedResponse {
            detail: "response is not a JSON object".to_string(),
        })?;

    let missing: Vec<String> = response_schema()
        .required_keys()
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ParseError::SchemaViolation { missing });
    }

    serde_json::from_value(value).map_err(|e| ParseError::MalformedResponse {
        detail: e.to_string(),
    })
}
