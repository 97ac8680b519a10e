//! Trip request model and its enumerations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Result, TripStellarError};

/// Budget tier driving the canned lodging query phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::Moderate => "moderate",
            BudgetTier::Luxury => "luxury",
        }
    }
}

/// Travel style tags selectable on a trip request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Adventure,
    Cultural,
    Relaxation,
    Foodie,
    Family,
    Romantic,
    Budget,
    Luxury,
}

impl TravelStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelStyle::Adventure => "adventure",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Relaxation => "relaxation",
            TravelStyle::Foodie => "foodie",
            TravelStyle::Family => "family",
            TravelStyle::Romantic => "romantic",
            TravelStyle::Budget => "budget",
            TravelStyle::Luxury => "luxury",
        }
    }
}

/// Parameters of an itinerary generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    /// Trip start, ISO calendar date
    pub start_date: NaiveDate,
    /// Trip end, inclusive; must not precede the start
    pub end_date: NaiveDate,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default = "default_travel_style")]
    pub travel_style: Vec<TravelStyle>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub special_requirements: String,
}

fn default_travelers() -> u32 {
    1
}

fn default_travel_style() -> Vec<TravelStyle> {
    vec![TravelStyle::Cultural]
}

impl TripRequest {
    /// Check structural and range invariants. Runs before any network
    /// call so invalid requests never cost an upstream round trip.
    pub fn validate(&self) -> Result<()> {
        let destination_chars = self.destination.chars().count();
        if !(2..=200).contains(&destination_chars) {
            return Err(TripStellarError::validation(
                "destination must be between 2 and 200 characters",
            ));
        }
        if !(1..=20).contains(&self.travelers) {
            return Err(TripStellarError::validation(
                "travelers must be between 1 and 20",
            ));
        }
        if self.end_date < self.start_date {
            return Err(TripStellarError::validation(
                "end date must not precede start date",
            ));
        }
        Ok(())
    }

    /// Trip length in days, inclusive of both endpoints. A same-day trip
    /// is one day, never zero.
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(1) as u32
    }
}
