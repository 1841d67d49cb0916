//! Pipeline orchestration and presentation bundle
//!
//! One request flows one way through here: trip parameters to prompt, one
//! upstream call, document validation, geo reshaping, presentation bundle.
//! Errors stop the flow at the document level (no partial itinerary is
//! ever shown) and are folded into a single generic user-facing message;
//! the detail goes to the log.

use serde::Serialize;
use tracing::{debug, error};

use crate::ai::AiService;
use crate::error::ItineraryError;
use crate::geo;
use crate::itinerary::{DayPlan, ItineraryDocument, MapMarker};
use crate::prompt;
use crate::trip::TripRequest;

/// Everything the rendering collaborator needs for one response.
///
/// The city is always present, even on failure; the day list is empty
/// whenever `error_message` is set.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryPage {
    pub city: String,
    pub days: Vec<DayPlan>,
    pub map_points: Vec<MapMarker>,
    pub error_message: Option<String>,
}

/// The reshaping pipeline around the single upstream call
pub struct ItineraryService {
    ai_client: Box<dyn AiService>,
}

impl ItineraryService {
    pub fn new(ai_client: Box<dyn AiService>) -> Self {
        Self { ai_client }
    }

    /// Run the full pipeline for one trip request.
    ///
    /// Never fails: any pipeline error is converted into a presentation
    /// bundle carrying the generic user message and an empty document.
    pub async fn generate(&self, trip: &TripRequest) -> ItineraryPage {
        match self.run_pipeline(trip).await {
            Ok((document, map_points)) => ItineraryPage {
                city: trip.city().to_string(),
                days: document.days,
                map_points,
                error_message: None,
            },
            Err(err) => {
                error!("Itinerary generation for '{}' failed: {}", trip.city(), err);
                ItineraryPage {
                    city: trip.city().to_string(),
                    days: Vec::new(),
                    map_points: Vec::new(),
                    error_message: Some(err.user_message()),
                }
            }
        }
    }

    async fn run_pipeline(
        &self,
        trip: &TripRequest,
    ) -> Result<(ItineraryDocument, Vec<MapMarker>), ItineraryError> {
        let prompt_text = prompt::build_prompt(trip);
        let schema = prompt::response_schema();

        debug!(
            "Requesting itinerary for '{}' ({} days)",
            trip.city(),
            trip.duration_days()
        );

        let payload = self.ai_client.request_itinerary(&prompt_text, &schema).await?;
        let mut document = ItineraryDocument::from_payload(&payload)?;
        debug!("Raw itinerary JSON: {}", payload);

        geo::attach_navigation_links(&mut document);
        let map_points = geo::collect_markers(&document);

        Ok((document, map_points))
    }
}
