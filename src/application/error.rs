//! Error taxonomy for analysis operations.

use thiserror::Error;

use crate::domain::analysis::ParseError;
use crate::ports::{ConfigStoreError, ModelError};

/// Errors surfaced by the analysis orchestrator.
///
/// None of these are retried by the core; the calling layer decides what
/// "try again" looks like. The chat path never produces these at all: it
/// degrades to a fixed reply instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The model's text was not parseable structured data.
    #[error("malformed model response: {detail}")]
    MalformedResponse { detail: String },

    /// The response parsed but required sections were missing.
    #[error("model response violates schema: missing sections {missing:?}")]
    SchemaViolation { missing: Vec<String> },

    /// A transport- or service-level failure, wrapping the cause.
    #[error("analysis failed: {source}")]
    Failed {
        #[source]
        source: ModelError,
    },

    /// The caller passed an unrecognized derived-analysis kind.
    #[error("invalid analysis kind: {0}")]
    InvalidKind(String),

    /// The caller omitted an option the requested kind requires.
    #[error("invalid analysis request: {0}")]
    InvalidRequest(String),

    /// The persona configuration could not be read.
    #[error("configuration unavailable: {source}")]
    ConfigUnavailable {
        #[source]
        source: ConfigStoreError,
    },
}

impl From<ParseError> for AnalysisError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedResponse { detail } => AnalysisError::MalformedResponse { detail },
            ParseError::SchemaViolation { missing } => AnalysisError::SchemaViolation { missing },
        }
    }
}

impl From<ModelError> for AnalysisError {
    fn from(source: ModelError) -> Self {
        AnalysisError::Failed { source }
    }
}
