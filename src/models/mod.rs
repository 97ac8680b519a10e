//! Data models for the `TripStellar` library
//!
//! This module contains the core domain models organized by concern:
//! - Poi: a named, located place with rating metadata
//! - Trip: the itinerary request and its enumerations
//! - Itinerary: the generated day-by-day travel document

pub mod itinerary;
pub mod poi;
pub mod trip;

// Re-export all public types for convenient access
pub use itinerary::{Activity, DayPlan, TripItinerary};
pub use poi::Poi;
pub use trip::{BudgetTier, TravelStyle, TripRequest};
