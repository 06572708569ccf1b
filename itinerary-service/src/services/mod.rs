pub mod extract;
pub mod metrics;
pub mod planner;
pub mod prompt;
pub mod providers;

pub use planner::ItineraryPlanner;
