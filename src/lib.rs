//! `TripStellar` - AI-assisted travel itinerary planning
//!
//! This library aggregates real point-of-interest data from the Google
//! Places API, renders it into a prompt for a generative model and turns
//! the model's reply into a validated day-by-day itinerary document.

pub mod cache;
pub mod config;
pub mod destination;
pub mod error;
pub mod llm;
pub mod models;
pub mod places;
pub mod planner;
pub mod prompt;

// Re-export core types for public API
pub use cache::{PoiCache, TtlCache};
pub use config::TripStellarConfig;
pub use destination::DestinationDataset;
pub use error::TripStellarError;
pub use llm::{GeminiClient, TextModel};
pub use models::{Activity, BudgetTier, DayPlan, Poi, TravelStyle, TripItinerary, TripRequest};
pub use places::{PlaceSuggestion, PlacesClient};
pub use planner::ItineraryPlanner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripStellarError>;
