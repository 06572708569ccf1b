//! Failures of the itinerary pipeline and how they reach the client.

use service_core::error::AppError;
use thiserror::Error;

use crate::services::extract::ExtractionError;
use crate::services::providers::GenerationError;

/// What the client sees for any server-side failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate itinerary. Please try again later.";

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error(
        "Missing required parameters: destination, duration, budget, and travelerType are required"
    )]
    MissingParameters,

    #[error("Invalid travelerType '{0}': expected one of solo, couple, family, friends, business")]
    InvalidTravelerType(String),

    #[error("Invalid budget: must be a positive amount")]
    InvalidBudget,

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Itinerary cannot be displayed: {0}")]
    Display(#[from] serde_json::Error),
}

impl ItineraryError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ItineraryError::MissingParameters
                | ItineraryError::InvalidTravelerType(_)
                | ItineraryError::InvalidBudget
        )
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ItineraryError::MissingParameters
            | ItineraryError::InvalidTravelerType(_)
            | ItineraryError::InvalidBudget => "invalid_request",
            ItineraryError::Generation(_) => "generation_error",
            ItineraryError::Extraction(_) => "extraction_error",
            ItineraryError::Display(_) => "display_error",
        }
    }
}

impl From<ItineraryError> for AppError {
    fn from(err: ItineraryError) -> Self {
        if err.is_client_error() {
            AppError::BadRequest(anyhow::Error::new(err))
        } else {
            AppError::failed(GENERATION_FAILED_MESSAGE, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn client_errors_map_to_bad_request() {
        let app_err: AppError = ItineraryError::MissingParameters.into();
        assert_eq!(app_err.status(), StatusCode::BAD_REQUEST);
        assert!(app_err.to_string().contains("Missing required parameters"));
    }

    #[test]
    fn server_errors_map_to_generic_failure() {
        let err = ItineraryError::Generation(GenerationError::Network("refused".to_string()));
        let app_err: AppError = err.into();
        assert_eq!(app_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            app_err,
            AppError::Failed { ref message, .. } if message == GENERATION_FAILED_MESSAGE
        ));
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ItineraryError::InvalidBudget.kind(), "invalid_request");
        assert_eq!(
            ItineraryError::Extraction(ExtractionError::NoJson { raw: String::new() }).kind(),
            "extraction_error"
        );
    }
}
