//! Gemini `generateContent` client
//!
//! Invokes the generative language REST API with a fixed system persona
//! and one rendered human turn. Generation parameters are fixed; they are
//! not tunable per request. The client performs no retries: a single
//! upstream failure is a single generation failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::TextModel;
use crate::config::ModelConfig;
use crate::{Result, TripStellarError};

// Fixed generation parameters
const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 8192;
const TOP_P: f64 = 0.95;

/// Client for the Gemini generative language API
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(TripStellarError::config("Gemini API key is not set"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripStellar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the request body for the `generateContent` endpoint
    fn build_request_body(&self, system: &str, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": system }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "topP": TOP_P
            }
        })
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    #[instrument(skip(self, system, prompt))]
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(system, prompt);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TripStellarError::api(format!(
                "Gemini API error {status}: {text}"
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let Some(candidate) = payload.candidates.into_iter().next() else {
            return Err(TripStellarError::model_output(
                "model response contained no candidates",
            ));
        };

        if candidate.finish_reason.as_deref().is_some_and(|r| r != "STOP") {
            warn!(
                reason = candidate.finish_reason.as_deref().unwrap_or(""),
                "model stopped for a non-standard reason"
            );
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(TripStellarError::model_output(
                "model response contained no text",
            ));
        }

        debug!(chars = text.len(), "model reply received");
        Ok(text)
    }
}

// Generative language API response types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}
