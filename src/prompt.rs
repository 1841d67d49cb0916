//! Prompt and response-schema construction
//!
//! Builds the natural-language instruction string and the machine-readable
//! schema descriptor sent alongside it. Both are pure transformations of a
//! validated [`TripRequest`]; the upstream service is instructed to answer
//! with a JSON array matching [`response_schema`].

use serde_json::{json, Value};

use crate::trip::TripRequest;

const DEFAULT_ENDING_POINT: &str = "a major departure hub";

/// Build the instruction string for the generative-text upstream.
///
/// Embeds every trip parameter verbatim plus the formatting and coordinate
/// rules the downstream reshaping depends on.
pub fn build_prompt(trip: &TripRequest) -> String {
    let interests = if trip.interests().is_empty() {
        "General sightseeing".to_string()
    } else {
        trip.interests()
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut prompt = format!(
        "Generate a detailed travel itinerary for a {duration}-day trip to {city}.\n\
         The traveler is a {traveler} with a {budget} budget.\n\
         Their interests are: {interests}.\n\
         The trip starts on {start_date} at {start_time} and ends on {end_date} at {end_time}.\n",
        duration = trip.duration_days(),
        city = trip.city(),
        traveler = trip.traveler_type(),
        budget = trip.budget(),
        interests = interests,
        start_date = trip.start_date().format("%Y-%m-%d"),
        start_time = trip.start_time().format("%H:%M"),
        end_date = trip.end_date().format("%Y-%m-%d"),
        end_time = trip.end_time().format("%H:%M"),
    );

    if let Some(start) = trip.starting_point() {
        prompt.push_str(&format!("The trip begins at {}.\n", start));
    }
    prompt.push_str(&format!(
        "The user must end up at {}.\n",
        trip.ending_point().unwrap_or(DEFAULT_ENDING_POINT)
    ));
    prompt.push_str("All costs should be in the local currency of the country.\n");

    prompt.push_str(
        "\n**DESCRIPTION FORMAT RULES**:\n\
         - Every activity description must be **concise, 3-4 bullet points only**.\n\
         - Write them like checklist items (e.g., \"- Explore temple\", \"- Take photos\").\n\
         - Do NOT write paragraphs, long explanations, or guides. Keep it short and practical.\n",
    );

    prompt.push_str(
        "\n**CRITICAL INSTRUCTION**: For every single activity, whether it is a 'Visit' or a \
         'Travel' type, you MUST provide precise latitude and longitude coordinates. This is a \
         mandatory requirement.\n\
         - For 'Visit' activities, you MUST populate the `latitude` and `longitude` fields.\n\
         - For 'Travel' activities, you MUST populate all four coordinate fields: \
         `start_point_lat`, `start_point_lon`, `end_point_lat`, and `end_point_lon`.\n\
         Do not leave any of these coordinate fields empty, null, or 0 unless the location is a \
         general area that cannot be mapped. The response is not useful without these \
         coordinates.\n",
    );

    prompt
}

/// The `responseSchema` descriptor: an array of day objects, each carrying
/// a label, a date and an array of activity objects.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": {"type": "STRING"},
                "date": {"type": "STRING"},
                "activities": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": {"type": "STRING"},
                            "type": {"type": "STRING", "enum": ["Visit", "Travel"]},
                            "time_slot": {"type": "STRING"},
                            "description": {"type": "STRING"},
                            "location_name": {"type": "STRING"},
                            "latitude": {"type": "NUMBER"},
                            "longitude": {"type": "NUMBER"},
                            "cost_estimate": {"type": "STRING"},
                            "transport_mode_details": {"type": "STRING"},
                            "start_point_location": {"type": "STRING"},
                            "end_point_location": {"type": "STRING"},
                            "start_point_lat": {"type": "NUMBER"},
                            "start_point_lon": {"type": "NUMBER"},
                            "end_point_lat": {"type": "NUMBER"},
                            "end_point_lon": {"type": "NUMBER"}
                        },
                        "required": ["id", "type", "time_slot", "description"]
                    }
                }
            },
            "required": ["day", "date", "activities"]
        }
    })
}
