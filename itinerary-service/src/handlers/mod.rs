pub mod health;
pub mod itinerary;
pub mod metrics;
pub mod pages;

use serde_json::Value;

use crate::error::ItineraryError;
use crate::models::TripRequestPayload;
use crate::services::metrics::record_itinerary_outcome;
use crate::startup::AppState;

/// Validation, then the planner. Shared by the JSON API and the form.
pub(crate) async fn plan_trip(
    state: &AppState,
    payload: TripRequestPayload,
) -> Result<Value, ItineraryError> {
    let request = payload.into_trip_request().map_err(|e| {
        tracing::warn!(error = %e, "Rejected itinerary request");
        e
    })?;
    state.planner.plan(&request).await
}

pub(crate) fn record_outcome<T>(result: &Result<T, ItineraryError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    record_itinerary_outcome(outcome);
}
