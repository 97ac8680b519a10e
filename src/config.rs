//! Configuration management for the `TripStellar` library
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripStellarError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Root configuration structure for the `TripStellar` library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripStellarConfig {
    /// Places API configuration
    pub places: PlacesConfig,
    /// Generative model configuration
    pub model: ModelConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Places API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Google Maps Platform API key
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the Places web service
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_places_timeout")]
    pub timeout_seconds: u32,
}

/// Generative model configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Gemini API key
    #[serde(default)]
    pub api_key: String,
    /// Model name used for itinerary generation
    #[serde(default = "default_model_name")]
    pub model: String,
    /// Base URL for the generative language API
    #[serde(default = "default_model_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached entries per cache
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
    /// Entry time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_places_timeout() -> u32 {
    15
}

fn default_model_name() -> String {
    "gemini-2.5-flash-preview-04-17".to_string()
}

fn default_model_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model_timeout() -> u32 {
    120
}

fn default_cache_max_entries() -> usize {
    500
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TripStellarConfig {
    fn default() -> Self {
        Self {
            places: PlacesConfig::default(),
            model: ModelConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_places_base_url(),
            timeout_seconds: default_places_timeout(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model_name(),
            base_url: default_model_base_url(),
            timeout_seconds: default_model_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl TripStellarConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPSTELLAR_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPSTELLAR")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripStellarConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripstellar").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_places_timeout();
        }
        if self.model.model.is_empty() {
            self.model.model = default_model_name();
        }
        if self.model.base_url.is_empty() {
            self.model.base_url = default_model_base_url();
        }
        if self.model.timeout_seconds == 0 {
            self.model.timeout_seconds = default_model_timeout();
        }
        if self.cache.max_entries == 0 {
            self.cache.max_entries = default_cache_max_entries();
        }
        if self.cache.ttl_seconds == 0 {
            self.cache.ttl_seconds = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // Keys may be absent in offline/test setups; when present they must
        // at least look like keys.
        for (name, key) in [
            ("Places", self.places.api_key.as_str()),
            ("Model", self.model.api_key.as_str()),
        ] {
            if key.is_empty() {
                continue;
            }
            if key.len() < 8 {
                return Err(TripStellarError::config(format!(
                    "{name} API key appears to be invalid (too short). Please check your API key."
                ))
                .into());
            }
            if key.len() > 100 {
                return Err(TripStellarError::config(format!(
                    "{name} API key appears to be invalid (too long). Please check your API key."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.places.timeout_seconds > 300 {
            return Err(
                TripStellarError::config("Places API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.model.timeout_seconds > 600 {
            return Err(
                TripStellarError::config("Model API timeout cannot exceed 600 seconds").into(),
            );
        }

        if self.cache.ttl_seconds > 7 * 24 * 60 * 60 {
            return Err(
                TripStellarError::config("Cache TTL cannot exceed 604800 seconds (1 week)").into(),
            );
        }

        if self.cache.max_entries > 100_000 {
            return Err(
                TripStellarError::config("Cache cannot hold more than 100000 entries").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripStellarError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Places", self.places.base_url.as_str()),
            ("Model", self.model.base_url.as_str()),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripStellarError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

/// Install a global `tracing` subscriber honoring `RUST_LOG` with the
/// configured level as fallback. Safe to call more than once.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TripStellarConfig::default();
        assert_eq!(
            config.places.base_url,
            "https://maps.googleapis.com/maps/api/place"
        );
        assert_eq!(config.places.timeout_seconds, 15);
        assert_eq!(config.model.model, "gemini-2.5-flash-preview-04-17");
        assert_eq!(config.cache.max_entries, 500);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
        assert!(config.places.api_key.is_empty());
    }

    #[test]
    fn test_config_validation_missing_api_keys() {
        let config = TripStellarConfig::default();
        // Keys are optional; validation passes without them.
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = TripStellarConfig::default();
        config.places.api_key = "short".to_string();
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripStellarConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripStellarConfig::default();
        config.places.timeout_seconds = 500; // Invalid - too high
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = TripStellarConfig::default();
        config.model.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("HTTP or HTTPS URL")
        );
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = TripStellarConfig::default();
        config.places.base_url = String::new();
        config.cache.max_entries = 0;
        config.apply_defaults();
        assert_eq!(config.places.base_url, default_places_base_url());
        assert_eq!(config.cache.max_entries, 500);
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripStellarConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripstellar"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
