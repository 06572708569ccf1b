use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::extract::extract_json;
use super::metrics;
use super::prompt::build_itinerary_prompt;
use super::providers::GenerationProvider;
use crate::error::ItineraryError;
use crate::models::TripRequest;

/// Runs one trip request through prompt, generation and extraction.
#[derive(Clone)]
pub struct ItineraryPlanner {
    provider: Arc<dyn GenerationProvider>,
}

impl ItineraryPlanner {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            provider = self.provider.name(),
            destination = %request.destination,
            duration = request.duration,
        )
    )]
    pub async fn plan(&self, request: &TripRequest) -> Result<Value, ItineraryError> {
        let prompt = build_itinerary_prompt(request);
        tracing::debug!(prompt_len = prompt.len(), "Prompt built");

        let started = Instant::now();
        let generated = self.provider.generate(&prompt).await;
        let elapsed = started.elapsed().as_secs_f64();
        metrics::record_generation(self.provider.name(), elapsed);

        let raw = generated.map_err(|e| {
            tracing::error!(error = %e, elapsed_secs = elapsed, "Generation failed");
            ItineraryError::from(e)
        })?;
        tracing::info!(
            elapsed_secs = elapsed,
            response_len = raw.len(),
            "Generation complete"
        );

        let itinerary = extract_json(&raw).map_err(|e| {
            tracing::error!(error = %e, raw = %e.raw(), "Could not extract itinerary JSON");
            ItineraryError::from(e)
        })?;
        tracing::info!("Itinerary extracted");

        Ok(itinerary)
    }
}
