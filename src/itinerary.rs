//! Itinerary document model and response validation
//!
//! The upstream service returns the itinerary as a JSON-encoded string
//! nested inside its response envelope. This module owns the second decode
//! of that double-encoded protocol: parsing the inner text into a typed
//! document, with a hard split between "not JSON at all" and "JSON of the
//! wrong shape". A structurally invalid payload fails the whole document;
//! there is no best-effort repair.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;

/// A coordinate value as returned by the upstream source.
///
/// The schema asks for numbers, but the model occasionally returns numeric
/// strings or junk. Wrong-typed coordinates must not fail document
/// validation, so the raw scalar is kept and coerced per point during geo
/// extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Coord {
    /// Coerce to a float: numbers pass through, numeric strings parse,
    /// anything else is unusable.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Coord::Number(n) => Some(*n),
            Coord::Text(s) => s.trim().parse().ok(),
            Coord::Other(_) => None,
        }
    }
}

/// Activity kind tag, `Visit` or `Travel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Visit,
    Travel,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Visit => f.write_str("Visit"),
            ActivityKind::Travel => f.write_str("Travel"),
        }
    }
}

/// A place to visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitActivity {
    pub id: String,
    pub time_slot: String,
    pub description: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<Coord>,
    #[serde(default)]
    pub longitude: Option<Coord>,
    #[serde(default)]
    pub cost_estimate: Option<String>,
}

/// A transit leg between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelActivity {
    pub id: String,
    pub time_slot: String,
    pub description: String,
    #[serde(default)]
    pub transport_mode_details: Option<String>,
    #[serde(default)]
    pub start_point_location: Option<String>,
    #[serde(default)]
    pub end_point_location: Option<String>,
    #[serde(default)]
    pub start_point_lat: Option<Coord>,
    #[serde(default)]
    pub start_point_lon: Option<Coord>,
    #[serde(default)]
    pub end_point_lat: Option<Coord>,
    #[serde(default)]
    pub end_point_lon: Option<Coord>,
    #[serde(default)]
    pub cost_estimate: Option<String>,
}

/// One scheduled item, tagged by its `type` field.
///
/// A kind other than exactly `Visit` or `Travel` fails the decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Activity {
    Visit(VisitActivity),
    Travel(TravelActivity),
}

impl Activity {
    pub fn id(&self) -> &str {
        match self {
            Activity::Visit(v) => &v.id,
            Activity::Travel(t) => &t.id,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::Visit(_) => ActivityKind::Visit,
            Activity::Travel(_) => ActivityKind::Travel,
        }
    }
}

/// One calendar day's ordered activities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub date: String,
    pub activities: Vec<Activity>,
    /// Derived after validation, never read from the upstream payload
    #[serde(default, skip_deserializing)]
    pub navigation_link: Option<String>,
}

/// Ordered sequence of day plans, in upstream order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItineraryDocument {
    pub days: Vec<DayPlan>,
}

impl ItineraryDocument {
    /// Decode the inner itinerary text into a typed document.
    ///
    /// Two failure modes, kept distinct: the text is not valid JSON at all
    /// ([`DocumentError::MalformedPayload`]), or it is valid JSON that does
    /// not match the expected shape ([`DocumentError::SchemaMismatch`]).
    pub fn from_payload(text: &str) -> Result<Self, DocumentError> {
        let value: Value =
            serde_json::from_str(text).map_err(DocumentError::MalformedPayload)?;

        if !value.is_array() {
            return Err(DocumentError::SchemaMismatch(
                "top-level value is not an array of day plans".to_string(),
            ));
        }

        let days: Vec<DayPlan> =
            serde_json::from_value(value).map_err(|e| DocumentError::SchemaMismatch(e.to_string()))?;

        Ok(Self { days })
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// A single mappable point derived from an activity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub popup_text: String,
    pub activity_id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub day_index: usize,
}
