pub mod form;
pub mod itinerary;
pub mod trip;

pub use form::{split_interests, TripForm};
pub use itinerary::{format_amount, Activity, Amount, BudgetLine, DayPlan, Itinerary};
pub use trip::{TravelerType, TripRequest, TripRequestPayload};
