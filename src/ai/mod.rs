//! Upstream generative-text integration
//!
//! Configuration for the Gemini API plus the [`AiService`] trait seam the
//! pipeline is written against. The trait keeps the reshaping pipeline
//! testable without network access or process environment dependencies.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ConfigError, UpstreamError};

/// Environment variable holding the API credential
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECONDS: u64 = 90;

/// Upstream client configuration.
///
/// Read once at process start and passed into the client constructor; the
/// pipeline never reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl AiConfig {
    /// Load the configuration from the process environment.
    ///
    /// A missing or empty `GEMINI_API_KEY` is a fatal startup condition,
    /// not a per-request error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR).map_err(|_| {
            ConfigError::MissingCredential {
                var: GEMINI_API_KEY_VAR,
            }
        })?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyCredential {
                var: GEMINI_API_KEY_VAR,
            });
        }

        let model =
            std::env::var(GEMINI_MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            model,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        })
    }
}

/// The single outbound operation of the pipeline.
///
/// Implementations issue one generation request carrying the prompt and the
/// response-schema descriptor and return the raw itinerary text payload
/// (the inner document of the double-encoded protocol, still unparsed).
/// No retries: every failure surfaces to the caller.
#[async_trait]
pub trait AiService: Send + Sync {
    async fn request_itinerary(
        &self,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<String, UpstreamError>;
}
