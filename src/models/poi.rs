//! Point-of-interest model produced by the places gateway

use serde::{Deserialize, Serialize};

/// A named, located place with rating metadata.
///
/// Constructed by the places gateway from upstream search results and
/// never mutated afterwards. Every field except the name is optional so
/// that partial place objects emitted by the model deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Display name
    pub name: String,
    /// Formatted street address
    pub address: Option<String>,
    /// Average rating, 0.0 to 5.0
    pub rating: Option<f64>,
    /// Number of ratings behind the average
    pub total_ratings: Option<u32>,
    /// Ordinal price tier
    pub price_level: Option<u8>,
    /// Category tags in upstream order
    #[serde(default)]
    pub types: Vec<String>,
    /// URL of the first upstream photo, if any
    pub photo_url: Option<String>,
    /// Upstream place identifier
    pub place_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Human-readable opening-hours lines
    #[serde(default)]
    pub opening_hours: Vec<String>,
    pub website: Option<String>,
}

impl Poi {
    /// Both coordinates, or nothing. The gateway guarantees the pair is
    /// populated together; model-emitted places may carry neither.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some((latitude, longitude)),
            _ => None,
        }
    }
}
