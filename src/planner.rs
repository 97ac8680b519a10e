//! Top-level itinerary generation pipeline
//!
//! Validates the request, aggregates real destination data, renders the
//! prompt, invokes the model and reconciles its reply with authoritative
//! place data. Every failure propagates to the caller; nothing here
//! retries and no partial itinerary is ever returned.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::destination::{self, DestinationDataset};
use crate::llm::TextModel;
use crate::models::{Poi, TripItinerary, TripRequest};
use crate::places::PlacesClient;
use crate::prompt;
use crate::{Result, TripStellarError};

/// How many aggregated entries replace the model's own top lists
const RECONCILED_RESTAURANTS: usize = 8;
const RECONCILED_ATTRACTIONS: usize = 10;

/// Generates complete travel itineraries from trip requests.
pub struct ItineraryPlanner {
    places: PlacesClient,
    model: Arc<dyn TextModel>,
}

impl ItineraryPlanner {
    pub fn new(places: PlacesClient, model: Arc<dyn TextModel>) -> Self {
        Self { places, model }
    }

    /// Generate a validated itinerary for the given request.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn generate(&self, request: &TripRequest) -> Result<TripItinerary> {
        // Reject invalid requests before spending any upstream calls.
        request.validate()?;
        let total_days = request.duration_days();

        let dataset =
            destination::aggregate(&self.places, &request.destination, request.budget).await?;
        let user_prompt = prompt::build_user_prompt(request, &dataset, total_days);

        let reply = self.model.generate(prompt::SYSTEM_PROMPT, &user_prompt).await?;
        let itinerary = finalize_itinerary(&reply, &dataset)?;

        info!(days = itinerary.days.len(), "itinerary generated");
        Ok(itinerary)
    }
}

/// Parse the model reply, overwrite its top-place lists with aggregated
/// data and construct the validated itinerary document.
fn finalize_itinerary(reply: &str, dataset: &DestinationDataset) -> Result<TripItinerary> {
    let mut payload = parse_model_payload(reply)?;
    reconcile(&mut payload, dataset)?;

    let itinerary: TripItinerary = serde_json::from_value(payload).map_err(|e| {
        TripStellarError::itinerary(format!("model reply does not form a valid itinerary: {e}"))
    })?;
    itinerary.validate()?;
    Ok(itinerary)
}

/// Parse the reply as a single JSON object, tolerating a Markdown code
/// fence around it.
fn parse_model_payload(reply: &str) -> Result<Value> {
    let stripped = strip_code_fences(reply);
    let payload: Value = serde_json::from_str(stripped)
        .map_err(|e| TripStellarError::model_output(format!("model reply is not valid JSON: {e}")))?;
    if !payload.is_object() {
        return Err(TripStellarError::model_output(
            "model reply is not a JSON object",
        ));
    }
    Ok(payload)
}

fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Replace the model's guessed top-place lists with authoritative data.
/// An empty aggregated list leaves the model's own value untouched.
fn reconcile(payload: &mut Value, dataset: &DestinationDataset) -> Result<()> {
    if !dataset.restaurants.is_empty() {
        payload["top_restaurants"] = poi_list(&dataset.restaurants, RECONCILED_RESTAURANTS)?;
    }
    if !dataset.attractions.is_empty() {
        payload["top_attractions"] = poi_list(&dataset.attractions, RECONCILED_ATTRACTIONS)?;
    }
    Ok(())
}

fn poi_list(places: &[Poi], limit: usize) -> Result<Value> {
    serde_json::to_value(&places[..places.len().min(limit)]).map_err(|e| {
        TripStellarError::itinerary(format!("failed to encode aggregated places: {e}"))
    })
}
