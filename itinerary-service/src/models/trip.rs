use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::ItineraryError;

/// Who is travelling. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelerType {
    Solo,
    Couple,
    Family,
    Friends,
    Business,
}

impl TravelerType {
    pub const ALL: [TravelerType; 5] = [
        TravelerType::Solo,
        TravelerType::Couple,
        TravelerType::Family,
        TravelerType::Friends,
        TravelerType::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelerType::Solo => "solo",
            TravelerType::Couple => "couple",
            TravelerType::Family => "family",
            TravelerType::Friends => "friends",
            TravelerType::Business => "business",
        }
    }

    /// Label shown in the form's select box.
    pub fn label(&self) -> &'static str {
        match self {
            TravelerType::Solo => "Solo",
            TravelerType::Couple => "Couple",
            TravelerType::Family => "Family",
            TravelerType::Friends => "Friends Group",
            TravelerType::Business => "Business",
        }
    }
}

impl fmt::Display for TravelerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelerType {
    type Err = ItineraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TravelerType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ItineraryError::InvalidTravelerType(s.to_string()))
    }
}

/// A validated trip request. Only ever built through [`TripRequestPayload::into_trip_request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    pub duration: u32,
    pub budget: f64,
    pub traveler_type: TravelerType,
    pub interests: Vec<String>,
}

/// Inbound body of `POST /api/generate-itinerary`, before validation.
///
/// Every field is optional so that a missing value is reported as a client
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestPayload {
    #[validate(required, length(min = 1))]
    pub destination: Option<String>,
    #[validate(required, range(min = 1))]
    pub duration: Option<u32>,
    #[validate(required)]
    pub budget: Option<f64>,
    #[validate(required, length(min = 1))]
    pub traveler_type: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

impl TripRequestPayload {
    pub fn into_trip_request(self) -> Result<TripRequest, ItineraryError> {
        self.validate()
            .map_err(|_| ItineraryError::MissingParameters)?;

        let (Some(destination), Some(duration), Some(budget), Some(traveler_type)) = (
            self.destination,
            self.duration,
            self.budget,
            self.traveler_type,
        ) else {
            return Err(ItineraryError::MissingParameters);
        };

        // zero is as good as absent
        if budget == 0.0 {
            return Err(ItineraryError::MissingParameters);
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(ItineraryError::InvalidBudget);
        }

        Ok(TripRequest {
            destination,
            duration,
            budget,
            traveler_type: traveler_type.parse()?,
            interests: self.interests.unwrap_or_default(),
        })
    }
}
