//! Error handling for the itinerary pipeline
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling.

use thiserror::Error;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Trip validation error: {0}")]
    Trip(#[from] TripError),
}

/// Process configuration errors, fatal at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable '{var}' is not set")]
    MissingCredential { var: &'static str },

    #[error("environment variable '{var}' is set but empty")]
    EmptyCredential { var: &'static str },
}

/// Failures of the single outbound call to the generative-text service
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream service unreachable: {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("upstream response envelope was malformed: {0}")]
    Envelope(String),
}

/// Failures while decoding the itinerary text payload into a typed document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("itinerary payload is not valid JSON: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("itinerary payload does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

/// Trip parameter validation errors
#[derive(Error, Debug)]
pub enum TripError {
    #[error("end date and time must be after start date and time")]
    InvalidWindow,

    #[error("destination city must not be empty")]
    EmptyCity,
}

impl ItineraryError {
    /// Generic user-facing message for a pipeline failure.
    ///
    /// Internal detail stays in the log; the strings returned here are the
    /// only error text ever shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ItineraryError::Upstream(UpstreamError::Status { status, .. }) => format!(
                "The itinerary service returned an error ({}). Please check the server logs.",
                status
            ),
            ItineraryError::Upstream(_) | ItineraryError::Document(_) => {
                "The model's response was not valid or had an unexpected structure. \
                 Please try again."
                    .to_string()
            }
            ItineraryError::Config(_) => {
                "The itinerary service is not configured. Please check the server logs."
                    .to_string()
            }
            ItineraryError::Trip(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_surface_the_status_code() {
        let err = ItineraryError::from(UpstreamError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        });
        assert!(err.user_message().contains("429"));
        assert!(!err.user_message().contains("quota"));
    }

    #[test]
    fn document_errors_use_the_generic_message() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ItineraryError::from(DocumentError::MalformedPayload(malformed));
        assert!(err.user_message().contains("Please try again"));
    }
}
