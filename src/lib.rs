//! Itinera - AI Trip Itinerary Pipeline
//!
//! This crate turns a validated set of trip parameters into a day-by-day
//! itinerary with map markers and per-day navigation links. The heavy
//! lifting is delegated to a generative-text upstream (Gemini) constrained
//! by a strict response schema; this crate owns the prompt construction,
//! the response validation, and the geo reshaping around that single call.
//!
//! ## Pipeline
//! TripRequest -> prompt + schema -> upstream call -> validated document
//! -> markers + navigation links -> presentation bundle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itinera::ai::{AiConfig, GeminiClient};
//! use itinera::service::ItineraryService;
//! use itinera::trip::{BudgetTier, TravelerType, TripRequest};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! # async fn run() -> Result<(), itinera::error::ItineraryError> {
//! let config = AiConfig::from_env()?;
//! let service = ItineraryService::new(Box::new(GeminiClient::new(config)?));
//!
//! let trip = TripRequest::new(
//!     "Paris".to_string(),
//!     NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
//!     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
//!     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
//!     BudgetTier::Mid,
//!     TravelerType::Couple,
//! )?;
//! let page = service.generate(&trip).await;
//! assert_eq!(page.city, "Paris");
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Trip parameters and form choice enums
pub mod trip;

// Itinerary document model and response validation
pub mod itinerary;

// Prompt and response-schema construction
pub mod prompt;

// Upstream generative-text client
pub mod ai;

// Marker extraction and route linking
pub mod geo;

// Pipeline orchestration and presentation bundle
pub mod service;

// Public re-exports for the common call path
pub use ai::{AiConfig, AiService, GeminiClient};
pub use error::{DocumentError, ItineraryError, UpstreamError};
pub use itinerary::{Activity, DayPlan, ItineraryDocument, MapMarker};
pub use service::{ItineraryPage, ItineraryService};
pub use trip::TripRequest;
