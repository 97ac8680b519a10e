//! Generated itinerary document models
//!
//! These mirror the JSON schema the model is instructed to emit. Optional
//! fields default so a reply missing advisory data still constructs; the
//! structural invariants are checked by [`TripItinerary::validate`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Poi;
use crate::{Result, TripStellarError};

/// One scheduled item of a day. Meals reuse the same shape; the only
/// difference is which list they sit in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Time label, e.g. "09:00 AM"
    pub time: String,
    pub title: String,
    pub description: String,
    /// Duration label, e.g. "2 hours"
    #[serde(default)]
    pub duration: Option<String>,
    /// The real place backing this item, when the model anchored it
    #[serde(default)]
    pub place: Option<Poi>,
    #[serde(default)]
    pub tips: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
}

/// A single day of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based position within the trip, sequential without gaps
    pub day: u32,
    /// Calendar date label, "YYYY-MM-DD"
    pub date: String,
    pub theme: String,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub meals: Vec<Activity>,
    #[serde(default)]
    pub accommodation_tip: Option<String>,
}

/// The complete generated travel itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripItinerary {
    pub destination: String,
    pub summary: String,
    pub total_days: u32,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub travel_tips: Vec<String>,
    #[serde(default)]
    pub packing_list: Vec<String>,
    #[serde(default)]
    pub estimated_total_budget: Option<String>,
    /// Emergency numbers keyed by service name
    #[serde(default)]
    pub emergency_contacts: HashMap<String, String>,
    pub days: Vec<DayPlan>,
    /// Overwritten with authoritative place data after generation
    #[serde(default)]
    pub top_restaurants: Vec<Poi>,
    /// Overwritten with authoritative place data after generation
    #[serde(default)]
    pub top_attractions: Vec<Poi>,
}

impl TripItinerary {
    /// Check the structural invariants of the document: the declared day
    /// count matches the day list, and days are numbered 1..=n in order.
    pub fn validate(&self) -> Result<()> {
        if self.total_days as usize != self.days.len() {
            return Err(TripStellarError::itinerary(format!(
                "total_days is {} but {} days were produced",
                self.total_days,
                self.days.len()
            )));
        }
        for (index, day) in self.days.iter().enumerate() {
            let expected = index as u32 + 1;
            if day.day != expected {
                return Err(TripStellarError::itinerary(format!(
                    "day {} found where day {expected} was expected",
                    day.day
                )));
            }
        }
        Ok(())
    }
}
