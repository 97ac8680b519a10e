//! Generative model clients
//!
//! The [`TextModel`] trait is the seam between the itinerary pipeline and
//! a concrete model provider, so tests can substitute a scripted model.

use async_trait::async_trait;

use crate::Result;

mod gemini;
pub use gemini::GeminiClient;

/// A model that turns a system instruction plus one human turn into a
/// single text reply.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}
