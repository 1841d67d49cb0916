use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use itinera::ai::{AiConfig, GeminiClient};
use itinera::service::{ItineraryPage, ItineraryService};
use itinera::trip::{BudgetTier, FoodPreference, Interest, TravelerType, TripRequest};

// Application state
#[derive(Clone)]
pub struct AppState {
    pub itinerary_service: Arc<ItineraryService>,
}

// API types
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Incoming trip form payload, validated into a `TripRequest`
#[derive(Deserialize)]
pub struct ItineraryRequestBody {
    pub city: String,
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time_of_day")]
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time_of_day")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub starting_point: Option<String>,
    #[serde(default)]
    pub ending_point: Option<String>,
    pub budget: BudgetTier,
    pub traveler_type: TravelerType,
    #[serde(default)]
    pub food_preferences: Vec<FoodPreference>,
    #[serde(default)]
    pub interests: Vec<Interest>,
}

// HTML time inputs submit "HH:MM"; chrono's serde impl wants seconds.
fn deserialize_time_of_day<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
        .map_err(serde::de::Error::custom)
}

impl TryFrom<ItineraryRequestBody> for TripRequest {
    type Error = itinera::error::TripError;

    fn try_from(body: ItineraryRequestBody) -> Result<Self, Self::Error> {
        Ok(TripRequest::new(
            body.city,
            body.start_date,
            body.start_time,
            body.end_date,
            body.end_time,
            body.budget,
            body.traveler_type,
        )?
        .with_points(body.starting_point, body.ending_point)
        .with_interests(body.interests)
        .with_food_preferences(body.food_preferences))
    }
}

#[derive(Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Choice lists for the form collaborator
#[derive(Serialize)]
pub struct FormOptions {
    pub budgets: Vec<ChoiceOption>,
    pub traveler_types: Vec<ChoiceOption>,
    pub food_preferences: Vec<ChoiceOption>,
    pub interests: Vec<ChoiceOption>,
}

impl FormOptions {
    fn current() -> Self {
        Self {
            budgets: BudgetTier::ALL
                .iter()
                .map(|b| ChoiceOption {
                    value: b.as_str(),
                    label: b.label(),
                })
                .collect(),
            traveler_types: TravelerType::ALL
                .iter()
                .map(|t| ChoiceOption {
                    value: t.as_str(),
                    label: t.label(),
                })
                .collect(),
            food_preferences: FoodPreference::ALL
                .iter()
                .map(|f| ChoiceOption {
                    value: f.as_str(),
                    label: f.label(),
                })
                .collect(),
            interests: Interest::ALL
                .iter()
                .map(|i| ChoiceOption {
                    value: i.as_str(),
                    label: i.label(),
                })
                .collect(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("itinera_web_server=info,itinera=debug,tower_http=debug")
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Upstream credential is required before the server starts serving
    let config = AiConfig::from_env()?;
    let client = GeminiClient::new(config)?;
    let itinerary_service = Arc::new(ItineraryService::new(Box::new(client)));

    let app_state = AppState { itinerary_service };

    // Build our application with routes
    let app = create_router(app_state);

    // Determine port
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(health_check))
        .route("/api/options", get(get_form_options))
        .route("/api/itineraries", post(generate_itinerary))
        // Serve static files (form page assets go here)
        .fallback_service(ServeDir::new("static"))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        success: true,
        data: Some("OK".to_string()),
        error: None,
    })
}

// Choice lists consumed by the form page
async fn get_form_options() -> Json<ApiResponse<FormOptions>> {
    Json(ApiResponse {
        success: true,
        data: Some(FormOptions::current()),
        error: None,
    })
}

// Generate an itinerary for a validated trip request
async fn generate_itinerary(
    State(state): State<AppState>,
    Json(body): Json<ItineraryRequestBody>,
) -> Result<Json<ApiResponse<ItineraryPage>>, (StatusCode, Json<ApiResponse<ItineraryPage>>)> {
    let trip = match TripRequest::try_from(body) {
        Ok(trip) => trip,
        Err(e) => {
            warn!("Rejected itinerary request: {}", e);
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                }),
            ));
        }
    };

    info!("Generating itinerary for '{}'", trip.city());
    let page = state.itinerary_service.generate(&trip).await;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(page),
        error: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(start: &str, end: &str) -> String {
        format!(
            r#"{{
                "city": "Paris",
                "start_date": "2026-09-01",
                "start_time": "{start}",
                "end_date": "2026-09-02",
                "end_time": "{end}",
                "budget": "mid",
                "traveler_type": "couple",
                "interests": ["history", "foodie"]
            }}"#
        )
    }

    #[test]
    fn accepts_times_with_and_without_seconds() {
        let body: ItineraryRequestBody =
            serde_json::from_str(&body_json("09:00", "18:30:15")).unwrap();
        assert_eq!(body.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(body.end_time, NaiveTime::from_hms_opt(18, 30, 15).unwrap());

        let trip = TripRequest::try_from(body).unwrap();
        assert_eq!(trip.city(), "Paris");
        assert_eq!(trip.interests().len(), 2);
    }

    #[test]
    fn rejects_an_inverted_date_window() {
        let json = r#"{
            "city": "Paris",
            "start_date": "2026-09-02",
            "start_time": "09:00",
            "end_date": "2026-09-01",
            "end_time": "18:00",
            "budget": "low",
            "traveler_type": "solo"
        }"#;
        let body: ItineraryRequestBody = serde_json::from_str(json).unwrap();
        assert!(TripRequest::try_from(body).is_err());
    }

    #[test]
    fn unknown_choice_values_fail_deserialization() {
        let json = body_json("09:00", "18:00").replace("\"mid\"", "\"lavish\"");
        assert!(serde_json::from_str::<ItineraryRequestBody>(&json).is_err());
    }

    #[test]
    fn options_cover_every_choice() {
        let options = FormOptions::current();
        assert_eq!(options.budgets.len(), BudgetTier::ALL.len());
        assert_eq!(options.traveler_types.len(), TravelerType::ALL.len());
        assert_eq!(options.food_preferences.len(), FoodPreference::ALL.len());
        assert_eq!(options.interests.len(), Interest::ALL.len());
        assert!(options.budgets.iter().any(|o| o.value == "low"));
        assert!(options
            .food_preferences
            .iter()
            .any(|o| o.value == "gluten_free"));
    }
}
