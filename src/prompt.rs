//! Prompt construction for the itinerary model
//!
//! Pure rendering only: identical inputs must produce byte-identical
//! output. Missing optional fields are omitted, never rendered as empty
//! placeholders.

use crate::destination::DestinationDataset;
use crate::models::{Poi, TravelStyle, TripRequest};

/// Fixed persona and rules sent as the system instruction.
pub const SYSTEM_PROMPT: &str = "\
You are TripStellar AI, an expert travel planner. You create detailed,
personalized travel itineraries using real place data provided to you.

IMPORTANT RULES:
1. Use the REAL restaurant and attraction data provided — include their actual names, ratings, and addresses.
2. Create a day-by-day itinerary with specific times, activities, restaurant recommendations, and travel tips.
3. Be practical with timing — account for travel between locations.
4. Match the travel style and budget preferences of the traveler.
5. Include local tips, cultural notes, and money-saving advice.
6. Always respond with valid JSON matching the exact schema specified.
";

/// Structural contract the model is instructed to follow. Field names and
/// nesting match the itinerary document models exactly.
const OUTPUT_SCHEMA: &str = r#"Generate a complete travel itinerary as JSON with this EXACT structure:
{
    "destination": "string - destination name",
    "summary": "string - 2-3 sentence trip summary",
    "total_days": number,
    "best_time_to_visit": "string",
    "currency": "string - local currency",
    "language": "string - primary language",
    "travel_tips": ["string array of 5-8 travel tips"],
    "packing_list": ["string array of 8-12 packing items"],
    "estimated_total_budget": "string - total estimated cost",
    "emergency_contacts": {"police": "number", "ambulance": "number", "tourist_helpline": "number"},
    "days": [
        {
            "day": 1,
            "date": "YYYY-MM-DD",
            "theme": "string - theme for the day",
            "activities": [
                {
                    "time": "09:00 AM",
                    "title": "string",
                    "description": "string - detailed description",
                    "duration": "string - e.g. 2 hours",
                    "place": {
                        "name": "string - actual place name from data",
                        "address": "string",
                        "rating": number,
                        "latitude": number,
                        "longitude": number
                    },
                    "tips": "string - insider tip",
                    "estimated_cost": "string"
                }
            ],
            "meals": [
                {
                    "time": "12:30 PM",
                    "title": "Lunch at [Restaurant Name]",
                    "description": "string",
                    "place": {
                        "name": "string - actual restaurant name from data",
                        "address": "string",
                        "rating": number,
                        "latitude": number,
                        "longitude": number
                    },
                    "estimated_cost": "string"
                }
            ],
            "accommodation_tip": "string"
        }
    ],
    "top_restaurants": [
        {
            "name": "string",
            "address": "string",
            "rating": number,
            "total_ratings": number,
            "latitude": number,
            "longitude": number
        }
    ],
    "top_attractions": [
        {
            "name": "string",
            "address": "string",
            "rating": number,
            "total_ratings": number,
            "latitude": number,
            "longitude": number
        }
    ]
}

Use the REAL place data provided above. Include 3-5 activities and 2-3 meals per day.
Respond with ONLY the JSON, no markdown formatting or code blocks."#;

/// Render a place list as a numbered, human-readable block.
#[must_use]
pub fn format_places(places: &[Poi]) -> String {
    if places.is_empty() {
        return "No data available".to_string();
    }

    let mut lines = Vec::with_capacity(places.len());
    for (index, place) in places.iter().enumerate() {
        let mut line = format!("{}. {}", index + 1, place.name);
        if let Some(rating) = place.rating.filter(|rating| *rating > 0.0) {
            line.push_str(&format!(" (Rating: {rating}⭐"));
            if let Some(total) = place.total_ratings.filter(|total| *total > 0) {
                line.push_str(&format!(", {total} reviews"));
            }
            line.push(')');
        }
        if let Some(address) = place.address.as_deref().filter(|address| !address.is_empty()) {
            line.push_str(&format!("\n   Address: {address}"));
        }
        if let Some(price_level) = place.price_level {
            line.push_str(&format!(
                "\n   Price: {}",
                "$".repeat(usize::from(price_level.max(1)))
            ));
        }
        if !place.types.is_empty() {
            let shown: Vec<&str> = place.types.iter().take(3).map(String::as_str).collect();
            line.push_str(&format!("\n   Type: {}", shown.join(", ")));
        }
        if let Some((latitude, longitude)) = place.coordinates() {
            line.push_str(&format!("\n   Coords: {latitude}, {longitude}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Render the human turn: trip parameters, the aggregated real-world data
/// and the output schema the model must follow.
#[must_use]
pub fn build_user_prompt(
    request: &TripRequest,
    dataset: &DestinationDataset,
    total_days: u32,
) -> String {
    let travel_style = if request.travel_style.is_empty() {
        "cultural".to_string()
    } else {
        request
            .travel_style
            .iter()
            .copied()
            .map(TravelStyle::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let interests = if request.interests.is_empty() {
        "general sightseeing".to_string()
    } else {
        request.interests.join(", ")
    };
    let special_requirements = if request.special_requirements.is_empty() {
        "none"
    } else {
        request.special_requirements.as_str()
    };

    let mut prompt = format!(
        "Plan a trip with the following details:\n\n\
         **Destination:** {destination}\n\
         **Dates:** {start_date} to {end_date} ({total_days} days)\n\
         **Travelers:** {travelers} person(s)\n\
         **Budget Level:** {budget}\n\
         **Travel Style:** {travel_style}\n\
         **Interests:** {interests}\n\
         **Special Requirements:** {special_requirements}\n\n\
         **REAL DATA FROM GOOGLE PLACES API:**\n\n\
         Top-Rated Restaurants:\n{restaurants}\n\n\
         Top Tourist Attractions:\n{attractions}\n\n\
         Hotels:\n{hotels}\n\n\
         ---\n\n",
        destination = request.destination,
        start_date = request.start_date,
        end_date = request.end_date,
        travelers = request.travelers,
        budget = request.budget.as_str(),
        restaurants = format_places(&dataset.restaurants),
        attractions = format_places(&dataset.attractions),
        hotels = format_places(&dataset.hotels),
    );
    prompt.push_str(OUTPUT_SCHEMA);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetTier;

    fn poi(name: &str) -> Poi {
        Poi {
            name: name.to_string(),
            address: Some(format!("{name} square 5")),
            rating: Some(4.7),
            total_ratings: Some(210),
            price_level: Some(2),
            types: vec![
                "restaurant".to_string(),
                "food".to_string(),
                "point_of_interest".to_string(),
                "establishment".to_string(),
            ],
            photo_url: None,
            place_id: Some(format!("id-{name}")),
            latitude: Some(48.85),
            longitude: Some(2.35),
            opening_hours: vec![],
            website: None,
        }
    }

    fn dataset() -> DestinationDataset {
        DestinationDataset {
            destination: "Paris, France".to_string(),
            budget: BudgetTier::Moderate,
            restaurants: vec![poi("Bistro")],
            attractions: vec![],
            hotels: vec![],
        }
    }

    fn request() -> TripRequest {
        TripRequest {
            destination: "Paris, France".to_string(),
            start_date: "2024-04-10".parse().unwrap(),
            end_date: "2024-04-12".parse().unwrap(),
            travelers: 2,
            budget: BudgetTier::Moderate,
            travel_style: vec![TravelStyle::Foodie, TravelStyle::Cultural],
            interests: vec!["museums".to_string()],
            special_requirements: String::new(),
        }
    }

    #[test]
    fn test_format_places_renders_every_present_field() {
        let rendered = format_places(&[poi("Bistro")]);
        assert_eq!(
            rendered,
            "1. Bistro (Rating: 4.7⭐, 210 reviews)\n   \
             Address: Bistro square 5\n   \
             Price: $$\n   \
             Type: restaurant, food, point_of_interest\n   \
             Coords: 48.85, 2.35"
        );
    }

    #[test]
    fn test_format_places_omits_missing_fields() {
        let bare = Poi {
            name: "Nameless corner".to_string(),
            address: None,
            rating: None,
            total_ratings: None,
            price_level: None,
            types: vec![],
            photo_url: None,
            place_id: None,
            latitude: None,
            longitude: None,
            opening_hours: vec![],
            website: None,
        };
        assert_eq!(format_places(&[bare]), "1. Nameless corner");
    }

    #[test]
    fn test_format_places_price_floor_is_one_symbol() {
        let mut place = poi("Cheap eats");
        place.price_level = Some(0);
        assert!(format_places(&[place]).contains("Price: $\n"));
    }

    #[test]
    fn test_format_places_empty_list() {
        assert_eq!(format_places(&[]), "No data available");
    }

    #[test]
    fn test_build_user_prompt_contains_parameters_and_schema() {
        let prompt = build_user_prompt(&request(), &dataset(), 3);
        assert!(prompt.contains("**Destination:** Paris, France"));
        assert!(prompt.contains("**Dates:** 2024-04-10 to 2024-04-12 (3 days)"));
        assert!(prompt.contains("**Travel Style:** foodie, cultural"));
        assert!(prompt.contains("**Interests:** museums"));
        assert!(prompt.contains("**Special Requirements:** none"));
        assert!(prompt.contains("Top-Rated Restaurants:\n1. Bistro"));
        assert!(prompt.contains("Top Tourist Attractions:\nNo data available"));
        assert!(prompt.contains("\"top_restaurants\": ["));
        assert!(prompt.contains("Respond with ONLY the JSON"));
    }

    #[test]
    fn test_build_user_prompt_defaults_for_empty_style_and_interests() {
        let mut req = request();
        req.travel_style.clear();
        req.interests.clear();
        let prompt = build_user_prompt(&req, &dataset(), 3);
        assert!(prompt.contains("**Travel Style:** cultural"));
        assert!(prompt.contains("**Interests:** general sightseeing"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let req = request();
        let data = dataset();
        let first = build_user_prompt(&req, &data, 3);
        let second = build_user_prompt(&req, &data, 3);
        assert_eq!(first, second);
    }
}
