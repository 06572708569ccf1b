use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "itinerary-service",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.planner.provider_name(),
    }))
}
