//! Turns a trip request into the instruction sent to the model.

use crate::models::TripRequest;

const REQUIREMENTS: &str = "\
Please format the response as a detailed itinerary with:
1. A day-by-day breakdown of activities
2. Estimated costs for each activity where applicable
3. Recommended accommodations that fit the budget
4. Transportation suggestions between locations
5. A budget breakdown by category (accommodation, food, transportation, activities)
6. The total estimated cost of the trip

Make sure the itinerary is realistic, takes into account local travel times, and fits within the specified budget.";

const RESPONSE_SHAPE: &str = r#"Return the response in JSON format with the following structure:
{
  "destination": string,
  "duration": number,
  "budget": number,
  "itinerary": [
    {
      "day": number,
      "title": string,
      "activities": [
        {
          "time": string (optional),
          "activity": string,
          "cost": number (optional),
          "notes": string (optional)
        }
      ]
    }
  ],
  "budgetBreakdown": [
    {
      "category": string,
      "amount": number,
      "details": string
    }
  ],
  "totalCost": number
}"#;

pub fn build_itinerary_prompt(request: &TripRequest) -> String {
    let interests = if request.interests.is_empty() {
        String::new()
    } else {
        format!(
            "The traveler is particularly interested in: {}.",
            request.interests.join(", ")
        )
    };

    format!(
        "Generate a detailed {duration}-day travel itinerary for a {traveler} traveler visiting {destination} with a budget of ${budget}.\n\
         {interests}\n\n\
         {REQUIREMENTS}\n\
         {RESPONSE_SHAPE}",
        duration = request.duration,
        traveler = request.traveler_type,
        destination = request.destination,
        budget = request.budget,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TravelerType;

    fn request(interests: &[&str]) -> TripRequest {
        TripRequest {
            destination: "Tokyo".to_string(),
            duration: 3,
            budget: 1000.0,
            traveler_type: TravelerType::Solo,
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn states_the_trip_parameters() {
        let prompt = build_itinerary_prompt(&request(&[]));
        assert!(prompt.starts_with(
            "Generate a detailed 3-day travel itinerary for a solo traveler visiting Tokyo with a budget of $1000."
        ));
    }

    #[test]
    fn contains_every_literal_value() {
        let trip = TripRequest {
            destination: "São Paulo, Brazil".to_string(),
            duration: 12,
            budget: 4321.75,
            traveler_type: TravelerType::Friends,
            interests: vec![],
        };
        let prompt = build_itinerary_prompt(&trip);
        assert!(prompt.contains("São Paulo, Brazil"));
        assert!(prompt.contains("12"));
        assert!(prompt.contains("4321.75"));
        assert!(prompt.contains("friends"));
    }

    #[test]
    fn interests_clause_only_when_present() {
        let without = build_itinerary_prompt(&request(&[]));
        assert!(!without.contains("particularly interested"));

        let with = build_itinerary_prompt(&request(&["food", "history", "anime"]));
        assert!(with.contains("The traveler is particularly interested in: food, history, anime."));
    }

    #[test]
    fn lists_all_six_requirements_and_the_shape() {
        let prompt = build_itinerary_prompt(&request(&[]));
        for n in 1..=6 {
            assert!(prompt.contains(&format!("\n{}. ", n)), "missing requirement {}", n);
        }
        assert!(prompt.contains("\"budgetBreakdown\""));
        assert!(prompt.contains("\"totalCost\": number"));
        assert!(prompt.trim_end().ends_with('}'));
    }

    #[test]
    fn deterministic() {
        let trip = request(&["beaches"]);
        assert_eq!(build_itinerary_prompt(&trip), build_itinerary_prompt(&trip));
    }
}
