use axum::{body::Bytes, extract::State, http::Method, Json};
use serde_json::Value;
use service_core::error::AppError;
use service_core::response::ApiResponse;

use super::{plan_trip, record_outcome};
use crate::error::ItineraryError;
use crate::models::TripRequestPayload;
use crate::startup::AppState;

/// `/api/generate-itinerary`: any method is routed here so that non-POST
/// requests get the JSON envelope instead of an empty 405.
#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn generate_itinerary(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    if method != Method::POST {
        tracing::warn!(%method, "Rejected non-POST itinerary request");
        return Err(AppError::MethodNotAllowed);
    }

    let result = match serde_json::from_slice::<TripRequestPayload>(&body) {
        Ok(payload) => plan_trip(&state, payload).await,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable itinerary request body");
            Err(ItineraryError::MissingParameters)
        }
    };
    record_outcome(&result);

    Ok(Json(ApiResponse::ok(result?)))
}
