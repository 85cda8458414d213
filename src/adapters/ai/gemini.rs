//! Gemini Provider - Generative Language API implementation of the model
//! port.
//!
//! Supports the three call shapes the core needs: structured output (JSON
//! mime type plus a response schema), free text with safety thresholds, and
//! multi-turn chat.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-pro")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let model = GeminiModel::new(config);
//! ```

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::chat::ChatRole;
use crate::ports::{
    ConversationRequest, FreeformRequest, GenerativeModel, ModelError, StructuredRequest,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gemini-1.5-pro", "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiModel {
    config: GeminiConfig,
    client: Client,
}

impl GeminiModel {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn post(&self, body: &GeminiRequest) -> Result<String, ModelError> {
        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key())])
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ModelError::network(format!("connection failed: {}", e))
                } else {
                    ModelError::network(e.to_string())
                }
            })?;

        let response = self.handle_status(response).await?;

        let envelope: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(format!("invalid response envelope: {}", e)))?;

        envelope.first_text().ok_or_else(|| {
            ModelError::parse("response contained no candidate text".to_string())
        })
    }

    async fn handle_status(&self, response: Response) -> Result<Response, ModelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "model service returned an error");

        match status.as_u16() {
            401 | 403 => Err(ModelError::AuthenticationFailed),
            429 => Err(ModelError::rate_limited(60)),
            400 => Err(ModelError::InvalidRequest(error_body)),
            500..=599 => Err(ModelError::unavailable(format!(
                "server error {}: {}",
                status, error_body
            ))),
            _ => Err(ModelError::network(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Maps a 1-10 sensitivity level onto Gemini safety thresholds.
    ///
    /// Higher sensitivity blocks more aggressively.
    fn safety_settings(sensitivity: u8) -> Vec<SafetySetting> {
        let threshold = match sensitivity {
            0..=3 => "BLOCK_ONLY_HIGH",
            4..=7 => "BLOCK_MEDIUM_AND_ABOVE",
            _ => "BLOCK_LOW_AND_ABOVE",
        };

        [
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
        .iter()
        .map(|category| SafetySetting {
            category: category.to_string(),
            threshold: threshold.to_string(),
        })
        .collect()
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn structured(&self, request: StructuredRequest) -> Result<String, ModelError> {
        let body = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: request.prompt,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.media.mime_type,
                            data: BASE64.encode(&request.media.bytes),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(request.schema.to_json()),
            }),
            safety_settings: None,
        };

        self.post(&body).await
    }

    async fn freeform(&self, request: FreeformRequest) -> Result<String, ModelError> {
        let body = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::Text {
                    text: request.prompt,
                }],
            }],
            generation_config: None,
            safety_settings: request.sensitivity.map(Self::safety_settings),
        };

        self.post(&body).await
    }

    async fn converse(&self, request: ConversationRequest) -> Result<String, ModelError> {
        let contents = request
            .turns
            .into_iter()
            .map(|turn| Content {
                role: match turn.role {
                    ChatRole::User => "user".to_string(),
                    ChatRole::Model => "model".to_string(),
                },
                parts: vec![Part::Text { text: turn.content }],
            })
            .collect();

        let body = GeminiRequest {
            contents,
            generation_config: None,
            safety_settings: None,
        };

        self.post(&body).await
    }
}

// Wire types for the Generative Language API.

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(rename = "safetySettings", skip_serializing_if = "Option::is_none")]
    safety_settings: Option<Vec<SafetySetting>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiResponse {
    /// Extracts the first text part of the first candidate, if any.
    fn first_text(&self) -> Option<String> {
        self.candidates.first().and_then(|candidate| {
            candidate.content.as_ref().and_then(|content| {
                content.parts.iter().find_map(|part| match part {
                    Part::Text { text } => Some(text.clone()),
                    Part::InlineData { .. } => None,
                })
            })
        })
    }
}
