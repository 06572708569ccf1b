//! Server-rendered form and itinerary display.

use askama::Template;
use axum::{extract::State, response::IntoResponse, Form};
use service_core::error::AppError;

use super::{plan_trip, record_outcome};
use crate::error::ItineraryError;
use crate::models::{format_amount, Itinerary, TravelerType, TripForm};
use crate::startup::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub form: TripForm,
    pub traveler_types: &'static [TravelerType],
}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        form: TripForm::default(),
        traveler_types: &TravelerType::ALL,
    }
}

pub struct ActivityView {
    pub time: Option<String>,
    pub activity: String,
    pub cost: Option<String>,
    pub notes: Option<String>,
}

pub struct DayView {
    pub heading: String,
    pub activities: Vec<ActivityView>,
}

pub struct BudgetLineView {
    pub category: String,
    pub amount: String,
    pub details: Option<String>,
}

/// The itinerary fragment injected under the form.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub destination: String,
    pub duration_label: String,
    pub budget_label: String,
    pub days: Vec<DayView>,
    pub breakdown: Vec<BudgetLineView>,
    pub total_cost: String,
    pub within_budget: bool,
    pub budget_status: Option<String>,
}

impl From<Itinerary> for ItineraryTemplate {
    fn from(plan: Itinerary) -> Self {
        let days = plan
            .itinerary
            .iter()
            .map(|day| DayView {
                heading: format!("Day {}: {}", day.day, day.title),
                activities: day
                    .activities
                    .iter()
                    .map(|a| ActivityView {
                        time: a.time.clone(),
                        activity: a.activity.clone(),
                        cost: a.cost.as_ref().map(ToString::to_string),
                        notes: a.notes.clone(),
                    })
                    .collect(),
            })
            .collect();

        let breakdown = plan
            .budget_breakdown
            .iter()
            .map(|line| BudgetLineView {
                category: line.category.clone(),
                amount: line.amount.to_string(),
                details: line.details.clone(),
            })
            .collect();

        Self {
            duration_label: format!("{} Days", plan.duration),
            budget_label: format!("Budget: {}", format_amount(plan.budget)),
            total_cost: plan.total_cost.to_string(),
            within_budget: plan.is_within_budget().unwrap_or(false),
            budget_status: plan.budget_status(),
            destination: plan.destination,
            days,
            breakdown,
        }
    }
}

/// Form submission: same pipeline as the JSON API, answered with HTML.
#[tracing::instrument(skip(state, form), fields(destination = %form.destination))]
pub async fn plan(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<ItineraryTemplate, AppError> {
    let result = match plan_trip(&state, form.into_payload()).await {
        Ok(value) => serde_json::from_value::<Itinerary>(value).map_err(|e| {
            tracing::error!(error = %e, "Generated itinerary does not match the display shape");
            ItineraryError::from(e)
        }),
        Err(e) => Err(e),
    };
    record_outcome(&result);

    Ok(ItineraryTemplate::from(result?))
}
