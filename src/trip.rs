//! Trip parameters collected from the user
//!
//! `TripRequest` is the validated input of the pipeline. The choice enums
//! mirror the options offered by the form collaborator; their wire values
//! are the ones the form submits.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::TripError;

/// Budget level for the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "low")]
    Economy,
    #[serde(rename = "mid")]
    Mid,
    #[serde(rename = "high")]
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Economy, BudgetTier::Mid, BudgetTier::Luxury];

    /// Wire value, as submitted by the form
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Economy => "low",
            BudgetTier::Mid => "mid",
            BudgetTier::Luxury => "high",
        }
    }

    /// Human-readable label for choice lists
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Economy => "Economy",
            BudgetTier::Mid => "Mid-range",
            BudgetTier::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the user is traveling with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelerType {
    Solo,
    Couple,
    Family,
    Friends,
    Business,
    Other,
}

impl TravelerType {
    pub const ALL: [TravelerType; 6] = [
        TravelerType::Solo,
        TravelerType::Couple,
        TravelerType::Family,
        TravelerType::Friends,
        TravelerType::Business,
        TravelerType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelerType::Solo => "solo",
            TravelerType::Couple => "couple",
            TravelerType::Family => "family",
            TravelerType::Friends => "friends",
            TravelerType::Business => "business",
            TravelerType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelerType::Solo => "Solo",
            TravelerType::Couple => "Couple",
            TravelerType::Family => "Family with Kids",
            TravelerType::Friends => "Couple of Friends",
            TravelerType::Business => "Business",
            TravelerType::Other => "Other",
        }
    }
}

impl std::fmt::Display for TravelerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Food preference tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPreference {
    Vegetarian,
    Vegan,
    Halal,
    Kosher,
    GlutenFree,
    Seafood,
    Italian,
    Asian,
    Local,
    #[serde(rename = "none")]
    NoPreference,
}

impl FoodPreference {
    pub const ALL: [FoodPreference; 10] = [
        FoodPreference::Vegetarian,
        FoodPreference::Vegan,
        FoodPreference::Halal,
        FoodPreference::Kosher,
        FoodPreference::GlutenFree,
        FoodPreference::Seafood,
        FoodPreference::Italian,
        FoodPreference::Asian,
        FoodPreference::Local,
        FoodPreference::NoPreference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodPreference::Vegetarian => "vegetarian",
            FoodPreference::Vegan => "vegan",
            FoodPreference::Halal => "halal",
            FoodPreference::Kosher => "kosher",
            FoodPreference::GlutenFree => "gluten_free",
            FoodPreference::Seafood => "seafood",
            FoodPreference::Italian => "italian",
            FoodPreference::Asian => "asian",
            FoodPreference::Local => "local",
            FoodPreference::NoPreference => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodPreference::Vegetarian => "Vegetarian",
            FoodPreference::Vegan => "Vegan",
            FoodPreference::Halal => "Halal",
            FoodPreference::Kosher => "Kosher",
            FoodPreference::GlutenFree => "Gluten-Free",
            FoodPreference::Seafood => "Seafood",
            FoodPreference::Italian => "Italian",
            FoodPreference::Asian => "Asian",
            FoodPreference::Local => "Local Cuisine",
            FoodPreference::NoPreference => "No Specific Preference",
        }
    }
}

/// Interest tags steering the generated activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    History,
    Art,
    Nature,
    Adventure,
    Shopping,
    Nightlife,
    Relaxing,
    Foodie,
    Museums,
    Photography,
}

impl Interest {
    pub const ALL: [Interest; 10] = [
        Interest::History,
        Interest::Art,
        Interest::Nature,
        Interest::Adventure,
        Interest::Shopping,
        Interest::Nightlife,
        Interest::Relaxing,
        Interest::Foodie,
        Interest::Museums,
        Interest::Photography,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::History => "history",
            Interest::Art => "art",
            Interest::Nature => "nature",
            Interest::Adventure => "adventure",
            Interest::Shopping => "shopping",
            Interest::Nightlife => "nightlife",
            Interest::Relaxing => "relaxing",
            Interest::Foodie => "foodie",
            Interest::Museums => "museums",
            Interest::Photography => "photography",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interest::History => "History",
            Interest::Art => "Art & Culture",
            Interest::Nature => "Nature & Outdoors",
            Interest::Adventure => "Adventure Sports",
            Interest::Shopping => "Shopping",
            Interest::Nightlife => "Nightlife",
            Interest::Relaxing => "Relaxing",
            Interest::Foodie => "Foodie Exploration",
            Interest::Museums => "Museums",
            Interest::Photography => "Photography",
        }
    }
}

impl std::fmt::Display for Interest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated trip parameters.
///
/// Construction goes through [`TripRequest::new`], which enforces the one
/// invariant of this type: the combined start date-time is strictly before
/// the combined end date-time.
#[derive(Debug, Clone, Serialize)]
pub struct TripRequest {
    city: String,
    start_date: NaiveDate,
    start_time: NaiveTime,
    end_date: NaiveDate,
    end_time: NaiveTime,
    starting_point: Option<String>,
    ending_point: Option<String>,
    budget: BudgetTier,
    traveler_type: TravelerType,
    food_preferences: Vec<FoodPreference>,
    interests: Vec<Interest>,
}

impl TripRequest {
    pub fn new(
        city: String,
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
        budget: BudgetTier,
        traveler_type: TravelerType,
    ) -> Result<Self, TripError> {
        if city.trim().is_empty() {
            return Err(TripError::EmptyCity);
        }

        let start = NaiveDateTime::new(start_date, start_time);
        let end = NaiveDateTime::new(end_date, end_time);
        if start >= end {
            return Err(TripError::InvalidWindow);
        }

        Ok(Self {
            city,
            start_date,
            start_time,
            end_date,
            end_time,
            starting_point: None,
            ending_point: None,
            budget,
            traveler_type,
            food_preferences: Vec::new(),
            interests: Vec::new(),
        })
    }

    /// Optional free-text start/end points (hotel, airport, station)
    pub fn with_points(
        mut self,
        starting_point: Option<String>,
        ending_point: Option<String>,
    ) -> Self {
        self.starting_point = starting_point.filter(|p| !p.trim().is_empty());
        self.ending_point = ending_point.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_interests(mut self, interests: Vec<Interest>) -> Self {
        self.interests = interests;
        self
    }

    pub fn with_food_preferences(mut self, food_preferences: Vec<FoodPreference>) -> Self {
        self.food_preferences = food_preferences;
        self
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn starting_point(&self) -> Option<&str> {
        self.starting_point.as_deref()
    }

    pub fn ending_point(&self) -> Option<&str> {
        self.ending_point.as_deref()
    }

    pub fn budget(&self) -> BudgetTier {
        self.budget
    }

    pub fn traveler_type(&self) -> TravelerType {
        self.traveler_type
    }

    pub fn food_preferences(&self) -> &[FoodPreference] {
        &self.food_preferences
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    /// Inclusive number of days covered by the trip
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
