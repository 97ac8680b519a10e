//! Integration tests for the itinerary generation surface
//!
//! Everything here runs offline: the places client is pointed at an
//! unroutable host, so any test that accidentally reaches for the network
//! fails fast instead of depending on external services.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tripstellar::config::{CacheConfig, PlacesConfig};
use tripstellar::destination::DestinationDataset;
use tripstellar::{
    BudgetTier, ItineraryPlanner, PlacesClient, Poi, PoiCache, TextModel, TripRequest,
    TripStellarError, prompt,
};

struct ScriptedModel {
    reply: String,
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(&self, _system: &str, _prompt: &str) -> tripstellar::Result<String> {
        Ok(self.reply.clone())
    }
}

fn offline_places_config() -> PlacesConfig {
    PlacesConfig {
        api_key: String::new(),
        base_url: "http://places.invalid/api".to_string(),
        timeout_seconds: 1,
    }
}

fn sample_poi(name: &str) -> Poi {
    Poi {
        name: name.to_string(),
        address: Some("1 Harbour View".to_string()),
        rating: Some(4.4),
        total_ratings: Some(87),
        price_level: Some(2),
        types: vec!["restaurant".to_string()],
        photo_url: None,
        place_id: Some(format!("id-{name}")),
        latitude: Some(-33.86),
        longitude: Some(151.21),
        opening_hours: vec![],
        website: None,
    }
}

fn sample_request() -> TripRequest {
    serde_json::from_str(
        r#"{
            "destination": "Sydney, Australia",
            "start_date": "2024-09-02",
            "end_date": "2024-09-04"
        }"#,
    )
    .unwrap()
}

#[test]
fn prompt_rendering_is_deterministic_across_calls() {
    let dataset = DestinationDataset {
        destination: "Sydney, Australia".to_string(),
        budget: BudgetTier::Moderate,
        restaurants: vec![sample_poi("Quay"), sample_poi("Bennelong")],
        attractions: vec![sample_poi("Opera House")],
        hotels: vec![],
    };
    let request = sample_request();

    let first = prompt::build_user_prompt(&request, &dataset, request.duration_days());
    let second = prompt::build_user_prompt(&request, &dataset, request.duration_days());
    assert_eq!(first, second);
    assert!(first.contains("**Dates:** 2024-09-02 to 2024-09-04 (3 days)"));
}

#[test]
fn injected_caches_are_isolated_per_client() {
    let first_cache = PoiCache::new(&CacheConfig::default());
    first_cache
        .searches
        .put("shared-key", vec![sample_poi("Quay")], Duration::from_secs(60));

    let second_cache = PoiCache::new(&CacheConfig::default());
    assert!(second_cache.searches.get("shared-key").is_none());
    assert!(first_cache.searches.get("shared-key").is_some());

    // Both construct fine around their own cache instance.
    let _ = PlacesClient::new(&offline_places_config(), first_cache).unwrap();
    let _ = PlacesClient::new(&offline_places_config(), second_cache).unwrap();
}

#[tokio::test]
async fn reversed_dates_fail_before_any_upstream_traffic() {
    let places = PlacesClient::new(
        &offline_places_config(),
        PoiCache::new(&CacheConfig::default()),
    )
    .unwrap();
    let planner = ItineraryPlanner::new(
        places,
        Arc::new(ScriptedModel {
            reply: "{}".to_string(),
        }),
    );

    let mut request = sample_request();
    request.start_date = "2024-09-10".parse().unwrap();

    let result = planner.generate(&request).await;
    assert!(matches!(result, Err(TripStellarError::Validation { .. })));
}

#[tokio::test]
async fn transport_failures_propagate_from_aggregation() {
    let places = PlacesClient::new(
        &offline_places_config(),
        PoiCache::new(&CacheConfig::default()),
    )
    .unwrap();
    let planner = ItineraryPlanner::new(
        places,
        Arc::new(ScriptedModel {
            reply: "{}".to_string(),
        }),
    );

    // Valid request, unreachable places host: generation fails as a whole
    // with a transport error rather than returning a partial itinerary.
    let result = planner.generate(&sample_request()).await;
    assert!(matches!(result, Err(TripStellarError::Transport { .. })));
}
