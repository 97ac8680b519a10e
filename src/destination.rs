//! Concurrent aggregation of destination place data

use futures::future::try_join3;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::Result;
use crate::models::{BudgetTier, Poi};
use crate::places::{HOTEL_COUNT, PlacesClient, TOP_ATTRACTION_COUNT, TOP_RESTAURANT_COUNT};

/// Everything known about a destination for one generation request.
/// Built fresh per request; only the underlying place queries are cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationDataset {
    pub destination: String,
    pub budget: BudgetTier,
    pub restaurants: Vec<Poi>,
    pub attractions: Vec<Poi>,
    pub hotels: Vec<Poi>,
}

/// Fetch restaurants, attractions and hotels for a destination in one
/// concurrent fan-out.
///
/// This is a join, not a race: all three queries are dispatched before any
/// is awaited, and the first transport failure fails the aggregation as a
/// whole. A sub-query that degrades cleanly to empty leaves its list empty
/// in the returned dataset; there is no partial failure state.
#[instrument(skip(places))]
pub async fn aggregate(
    places: &PlacesClient,
    destination: &str,
    budget: BudgetTier,
) -> Result<DestinationDataset> {
    let (restaurants, attractions, hotels) = try_join3(
        places.top_restaurants(destination, TOP_RESTAURANT_COUNT),
        places.top_attractions(destination, TOP_ATTRACTION_COUNT),
        places.hotels(destination, budget, HOTEL_COUNT),
    )
    .await?;

    info!(
        restaurants = restaurants.len(),
        attractions = attractions.len(),
        hotels = hotels.len(),
        "aggregated destination data"
    );

    Ok(DestinationDataset {
        destination: destination.to_string(),
        budget,
        restaurants,
        attractions,
        hotels,
    })
}
