//! Google Gemini API client
//!
//! Issues the pipeline's single outbound request: one POST to the
//! `generateContent` endpoint carrying the prompt and the response-schema
//! descriptor, under a bounded timeout. The response envelope is decoded
//! here (the first parse of the double-encoded protocol); the itinerary
//! text it contains is returned unparsed for the validator.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::{AiConfig, AiService, GEMINI_API_KEY_VAR};
use crate::error::{ConfigError, ItineraryError, UpstreamError};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: AiConfig,
    client: Client,
    base_url: String,
}

/// Gemini API request format
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

/// Role-tagged content block
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

/// Generation configuration forcing structured JSON output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// Gemini API response envelope
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default, rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Rejects an empty API key up front; a service built without a
    /// credential must never start serving.
    pub fn new(config: AiConfig) -> Result<Self, ItineraryError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyCredential {
                var: GEMINI_API_KEY_VAR,
            }
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(UpstreamError::Unavailable)?;

        Ok(Self {
            config,
            client,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Decode the response envelope and pull out the itinerary text.
    ///
    /// First parse of the double-encoded protocol. The text returned here
    /// is itself JSON, parsed separately by the document validator.
    fn extract_payload_text(body: &str) -> Result<String, UpstreamError> {
        let envelope: GeminiResponse = serde_json::from_str(body)
            .map_err(|e| UpstreamError::Envelope(format!("undecodable envelope: {}", e)))?;

        if let Some(usage) = &envelope.usage_metadata {
            info!(
                "Gemini API usage - prompt: {:?} tokens, response: {:?} tokens, total: {:?} tokens",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        let candidate = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Envelope("no candidates in response".to_string()))?;

        let part = candidate
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Envelope("no parts in candidate".to_string()))?;

        Ok(part.text)
    }
}

#[async_trait]
impl AiService for GeminiClient {
    async fn request_itinerary(
        &self,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<String, UpstreamError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema.clone(),
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.config.model, self.config.api_key
        );

        debug!(
            "Sending request to Gemini API: {}",
            url.replace(&self.config.api_key, "***")
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(UpstreamError::Unavailable)?;

        let status = response.status();
        let response_text = response.text().await.map_err(UpstreamError::Unavailable)?;

        debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            error!("Gemini API error: {} - {}", status, response_text);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        Self::extract_payload_text(&response_text)
    }
}
