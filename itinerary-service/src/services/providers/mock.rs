//! Offline provider for local development and tests.

use super::{GenerationError, GenerationProvider};
use async_trait::async_trait;

/// A fenced sample itinerary, shaped like a typical chat model reply.
pub const SAMPLE_RESPONSE: &str = r#"Here is your itinerary:

```json
{
  "destination": "Tokyo, Japan",
  "duration": 2,
  "budget": 1000,
  "itinerary": [
    {
      "day": 1,
      "title": "Arrival and Shinjuku",
      "activities": [
        {"time": "15:00", "activity": "Check in at a business hotel in Shinjuku", "cost": 120},
        {"time": "18:00", "activity": "Dinner in Omoide Yokocho", "cost": 25, "notes": "Cash only at most stalls"}
      ]
    },
    {
      "day": 2,
      "title": "Temples and markets",
      "activities": [
        {"time": "09:00", "activity": "Senso-ji temple in Asakusa", "cost": 0},
        {"time": "12:00", "activity": "Lunch at Tsukiji outer market", "cost": 30},
        {"activity": "Evening walk through Shibuya crossing"}
      ]
    }
  ],
  "budgetBreakdown": [
    {"category": "Accommodation", "amount": 240, "details": "Two nights"},
    {"category": "Food", "amount": 120, "details": "Street food and casual dining"},
    {"category": "Transportation", "amount": 40, "details": "Suica card top-ups"},
    {"category": "Activities", "amount": 20}
  ],
  "totalCost": 420
}
```

Enjoy your trip!"#;

pub struct MockGenerationProvider {
    response: Result<String, String>,
}

impl MockGenerationProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// A provider whose every call fails with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
        }
    }
}

impl Default for MockGenerationProvider {
    fn default() -> Self {
        Self::new(SAMPLE_RESPONSE)
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(prompt_len = prompt.len(), "Mock provider generating");

        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(GenerationError::Network(message.clone())),
        }
    }
}
