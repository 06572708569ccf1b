use serde::Deserialize;

use super::trip::{TravelerType, TripRequestPayload};

/// What the trip form holds. HTML forms send every field as text, so numbers
/// stay strings until [`TripForm::into_payload`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripForm {
    pub destination: String,
    pub duration: String,
    pub budget: String,
    pub traveler_type: String,
    pub interests: String,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration: "3".to_string(),
            budget: "1000".to_string(),
            traveler_type: TravelerType::Solo.as_str().to_string(),
            interests: String::new(),
        }
    }
}

impl TripForm {
    /// Shape the form into the API payload. Blank or unparseable numbers become
    /// absent values and are rejected by validation downstream.
    pub fn into_payload(self) -> TripRequestPayload {
        TripRequestPayload {
            destination: non_blank(self.destination),
            duration: self.duration.trim().parse().ok(),
            budget: self.budget.trim().parse().ok(),
            traveler_type: non_blank(self.traveler_type),
            interests: Some(split_interests(&self.interests)),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// "food, history,, museums " -> ["food", "history", "museums"]
pub fn split_interests(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
