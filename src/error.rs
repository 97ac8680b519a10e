//! Error types and handling for the `TripStellar` library

use thiserror::Error;

/// Main error type for the `TripStellar` library
#[derive(Error, Debug)]
pub enum TripStellarError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Network or timeout faults reaching an upstream service
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// Non-success responses from an upstream API
    #[error("API error: {message}")]
    Api { message: String },

    /// The model reply could not be parsed as the expected JSON object
    #[error("Model output error: {message}")]
    ModelOutput { message: String },

    /// The reconciled itinerary failed field-level construction
    #[error("Itinerary error: {message}")]
    Itinerary { message: String },
}

impl TripStellarError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new model output error
    pub fn model_output<S: Into<String>>(message: S) -> Self {
        Self::ModelOutput {
            message: message.into(),
        }
    }

    /// Create a new itinerary construction error
    pub fn itinerary<S: Into<String>>(message: S) -> Self {
        Self::Itinerary {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripStellarError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripStellarError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripStellarError::Transport { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TripStellarError::Api { .. } => {
                "An upstream service rejected the request. Please try again later.".to_string()
            }
            TripStellarError::ModelOutput { .. } | TripStellarError::Itinerary { .. } => {
                "The itinerary could not be generated. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripStellarError::config("missing API key");
        assert!(matches!(config_err, TripStellarError::Config { .. }));

        let validation_err = TripStellarError::validation("end date precedes start date");
        assert!(matches!(validation_err, TripStellarError::Validation { .. }));

        let model_err = TripStellarError::model_output("reply is not JSON");
        assert!(matches!(model_err, TripStellarError::ModelOutput { .. }));

        let itinerary_err = TripStellarError::itinerary("days missing");
        assert!(matches!(itinerary_err, TripStellarError::Itinerary { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripStellarError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = TripStellarError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let model_err = TripStellarError::model_output("test");
        assert!(model_err.user_message().contains("could not be generated"));
    }

    #[test]
    fn test_model_output_distinct_from_itinerary() {
        let parse_err = TripStellarError::model_output("bad payload");
        let shape_err = TripStellarError::itinerary("bad shape");
        assert!(!matches!(parse_err, TripStellarError::Itinerary { .. }));
        assert!(!matches!(shape_err, TripStellarError::ModelOutput { .. }));
    }
}
