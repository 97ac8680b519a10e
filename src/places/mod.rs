//! Google Places gateway
//!
//! Queries the Places web service (text search, details, autocomplete),
//! normalizes results into [`Poi`] values and shields the upstream API
//! behind an injected TTL cache. A clean non-success upstream status
//! degrades to an empty result and is logged; transport faults propagate
//! to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::cache::PoiCache;
use crate::config::PlacesConfig;
use crate::models::{BudgetTier, Poi};
use crate::{Result, TripStellarError};

/// Default result counts for the canned destination queries
pub const TOP_RESTAURANT_COUNT: usize = 8;
pub const TOP_ATTRACTION_COUNT: usize = 10;
pub const HOTEL_COUNT: usize = 5;

const RESTAURANT_MIN_RATING: f64 = 4.0;
const ATTRACTION_MIN_RATING: f64 = 4.0;
const HOTEL_MIN_RATING: f64 = 3.5;

/// Search radius in meters, applied only when a location bias is given
const DEFAULT_RADIUS_METERS: u32 = 10_000;

/// Field mask requested from the details endpoint
const DETAILS_FIELDS: &str = "name,formatted_address,rating,user_ratings_total,price_level,\
                              types,photos,geometry,opening_hours,website,formatted_phone_number,\
                              reviews,url";

/// One autocomplete suggestion row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub description: String,
    pub place_id: String,
    pub main_text: String,
    pub secondary_text: String,
}

/// Client for the Google Places web service
pub struct PlacesClient {
    http: Client,
    api_key: String,
    base_url: String,
    cache: PoiCache,
}

impl PlacesClient {
    /// Create a new gateway from configuration and an owned cache.
    pub fn new(config: &PlacesConfig, cache: PoiCache) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripStellar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// Search for places with the Places Text Search API.
    ///
    /// Results are filtered to `rating >= min_rating` (absent ratings count
    /// as 0), capped at `max_results` in upstream relevance order and then
    /// re-sorted by rating for presentation. Repeating the same search
    /// within the cache TTL issues no upstream request.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        location: Option<&str>,
        radius: u32,
        place_type: Option<&str>,
        min_rating: f64,
        max_results: usize,
    ) -> Result<Vec<Poi>> {
        if !(0.0..=5.0).contains(&min_rating) {
            return Err(TripStellarError::validation(format!(
                "minimum rating {min_rating} is outside [0, 5]"
            )));
        }
        if !(1..=20).contains(&max_results) {
            return Err(TripStellarError::validation(format!(
                "max results {max_results} is outside [1, 20]"
            )));
        }

        let cache_key = search_cache_key(query, location, place_type, min_rating);
        if let Some(cached) = self.cache.searches.get(&cache_key) {
            debug!(%cache_key, "place search served from cache");
            return Ok(cached);
        }

        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(location) = location {
            params.push(("location", location.to_string()));
            params.push(("radius", radius.to_string()));
        }
        if let Some(place_type) = place_type {
            params.push(("type", place_type.to_string()));
        }

        let url = format!("{}/textsearch/json", self.base_url);
        let response: google::SearchResponse = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            warn!(
                status = %response.status,
                error = response.error_message.as_deref().unwrap_or(""),
                "places search degraded to an empty result"
            );
            return Ok(Vec::new());
        }

        let places = self.collect_pois(response.results, min_rating, max_results);
        info!(count = places.len(), "place search fetched from upstream");
        self.cache
            .searches
            .put(&cache_key, places.clone(), self.cache.ttl());
        Ok(places)
    }

    /// Top-rated restaurants at a destination.
    pub async fn top_restaurants(&self, destination: &str, max_results: usize) -> Result<Vec<Poi>> {
        self.search(
            &format!("best restaurants in {destination}"),
            None,
            DEFAULT_RADIUS_METERS,
            Some("restaurant"),
            RESTAURANT_MIN_RATING,
            max_results,
        )
        .await
    }

    /// Top-rated tourist attractions at a destination.
    pub async fn top_attractions(&self, destination: &str, max_results: usize) -> Result<Vec<Poi>> {
        self.search(
            &format!("top tourist attractions in {destination}"),
            None,
            DEFAULT_RADIUS_METERS,
            Some("tourist_attraction"),
            ATTRACTION_MIN_RATING,
            max_results,
        )
        .await
    }

    /// Hotels at a destination, phrased for the requested budget tier.
    pub async fn hotels(
        &self,
        destination: &str,
        budget: BudgetTier,
        max_results: usize,
    ) -> Result<Vec<Poi>> {
        self.search(
            &hotel_query(destination, budget),
            None,
            DEFAULT_RADIUS_METERS,
            Some("lodging"),
            HOTEL_MIN_RATING,
            max_results,
        )
        .await
    }

    /// Extended detail blob for a single place, cached independently of
    /// searches. A clean non-success status resolves to `None`.
    #[instrument(skip(self))]
    pub async fn details(&self, place_id: &str) -> Result<Option<Value>> {
        let cache_key = format!("detail:{place_id}");
        if let Some(cached) = self.cache.details.get(&cache_key) {
            debug!(%cache_key, "place details served from cache");
            return Ok(Some(cached));
        }

        let url = format!("{}/details/json", self.base_url);
        let response: google::DetailsResponse = self
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAILS_FIELDS),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            warn!(status = %response.status, "place details unavailable");
            return Ok(None);
        }
        let Some(result) = response.result else {
            warn!("place details response carried no result object");
            return Ok(None);
        };

        self.cache
            .details
            .put(&cache_key, result.clone(), self.cache.ttl());
        Ok(Some(result))
    }

    /// Autocomplete suggestions for a partial place name. Inputs change
    /// keystroke by keystroke, so these are never cached.
    #[instrument(skip(self))]
    pub async fn autocomplete(
        &self,
        input: &str,
        types: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>> {
        let url = format!("{}/autocomplete/json", self.base_url);
        let response: google::AutocompleteResponse = self
            .http
            .get(&url)
            .query(&[
                ("input", input),
                ("types", types.unwrap_or("(cities)")),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            warn!(status = %response.status, "autocomplete degraded to an empty result");
            return Ok(Vec::new());
        }

        let suggestions = response
            .predictions
            .into_iter()
            .map(|prediction| {
                let formatting = prediction.structured_formatting.unwrap_or_default();
                PlaceSuggestion {
                    description: prediction.description.unwrap_or_default(),
                    place_id: prediction.place_id.unwrap_or_default(),
                    main_text: formatting.main_text.unwrap_or_default(),
                    secondary_text: formatting.secondary_text.unwrap_or_default(),
                }
            })
            .collect();
        Ok(suggestions)
    }

    /// Filter, cap and order upstream results.
    ///
    /// The cap is applied before the sort, so the returned set is the first
    /// N qualifying matches by upstream relevance re-ordered for
    /// presentation, not the true top N by rating.
    fn collect_pois(
        &self,
        results: Vec<google::PlaceResult>,
        min_rating: f64,
        max_results: usize,
    ) -> Vec<Poi> {
        let mut places: Vec<Poi> = results
            .into_iter()
            .filter(|result| result.rating.unwrap_or(0.0) >= min_rating)
            .take(max_results)
            .map(|result| self.to_poi(result))
            .collect();

        places.sort_by(|a, b| {
            (b.rating.unwrap_or(0.0), b.total_ratings.unwrap_or(0))
                .partial_cmp(&(a.rating.unwrap_or(0.0), a.total_ratings.unwrap_or(0)))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        places
    }

    fn to_poi(&self, result: google::PlaceResult) -> Poi {
        let photo_url = result
            .photos
            .first()
            .and_then(|photo| photo.photo_reference.as_deref())
            .filter(|reference| !reference.is_empty())
            .map(|reference| {
                format!(
                    "{}/photo?maxwidth=800&photo_reference={}&key={}",
                    self.base_url, reference, self.api_key
                )
            });

        let (latitude, longitude) = result
            .geometry
            .and_then(|geometry| geometry.location)
            .map_or((None, None), |location| {
                (Some(location.lat), Some(location.lng))
            });

        Poi {
            name: result.name.unwrap_or_default(),
            address: result.formatted_address,
            rating: result.rating,
            total_ratings: result.user_ratings_total,
            price_level: result.price_level,
            types: result.types,
            photo_url,
            place_id: result.place_id,
            latitude,
            longitude,
            opening_hours: Vec::new(),
            website: None,
        }
    }
}

/// Exact query signature used as cache key. Two equivalent queries with
/// different capitalization or parameter spelling are distinct keys.
fn search_cache_key(
    query: &str,
    location: Option<&str>,
    place_type: Option<&str>,
    min_rating: f64,
) -> String {
    format!(
        "{}:{}:{}:{}",
        query,
        location.unwrap_or(""),
        place_type.unwrap_or(""),
        min_rating
    )
}

fn hotel_query(destination: &str, budget: BudgetTier) -> String {
    match budget {
        BudgetTier::Budget => format!("budget hotels in {destination}"),
        BudgetTier::Moderate => format!("good hotels in {destination}"),
        BudgetTier::Luxury => format!("luxury hotels in {destination}"),
    }
}

/// Places web service response structures
mod google {
    use serde::Deserialize;
    use serde_json::Value;

    /// Text search response envelope
    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        pub status: String,
        #[serde(default)]
        pub results: Vec<PlaceResult>,
        pub error_message: Option<String>,
    }

    /// One text search result
    #[derive(Debug, Deserialize)]
    pub struct PlaceResult {
        pub name: Option<String>,
        pub formatted_address: Option<String>,
        pub rating: Option<f64>,
        pub user_ratings_total: Option<u32>,
        pub price_level: Option<u8>,
        #[serde(default)]
        pub types: Vec<String>,
        #[serde(default)]
        pub photos: Vec<Photo>,
        pub place_id: Option<String>,
        pub geometry: Option<Geometry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Photo {
        pub photo_reference: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub location: Option<LatLng>,
    }

    #[derive(Debug, Deserialize)]
    pub struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }

    /// Details response envelope; the `result` object is passed through
    /// to callers unmodified.
    #[derive(Debug, Deserialize)]
    pub struct DetailsResponse {
        pub status: String,
        pub result: Option<Value>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AutocompleteResponse {
        pub status: String,
        #[serde(default)]
        pub predictions: Vec<Prediction>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Prediction {
        pub description: Option<String>,
        pub place_id: Option<String>,
        pub structured_formatting: Option<StructuredFormatting>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct StructuredFormatting {
        pub main_text: Option<String>,
        pub secondary_text: Option<String>,
    }
}
