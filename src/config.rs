//! Tracker configuration loaded from environment variables.
//!
//! The map credential is optional: without it the static map service is
//! treated as unavailable and activities finalize without a route image.

use crate::services::static_map::MapStyle;
use std::env;

/// Tracker configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Map rendering ---
    /// Static map service access token (absent = service unavailable)
    pub map_access_token: Option<String>,
    /// Static map service base URL
    pub map_base_url: String,
    /// Map style for rendered routes
    pub map_style: MapStyle,
    /// Issue a HEAD request to confirm the rendered URL before keeping it
    pub map_verify: bool,

    // --- Persistence ---
    /// Remote activity sink endpoint
    pub persistence_url: Option<String>,
    /// Bearer token for the activity sink
    pub persistence_token: Option<String>,

    // --- Workout mode ---
    /// Estimated energy burned per minute of resistance training
    pub workout_kcal_per_minute: f64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            map_access_token: Some("test_map_token".to_string()),
            map_base_url: "https://api.mapbox.com".to_string(),
            map_style: MapStyle::Outdoors,
            map_verify: false,
            persistence_url: None,
            persistence_token: None,
            workout_kcal_per_minute: 6.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let map_style = match env::var("MAP_STYLE") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("MAP_STYLE", v.clone()))?,
            Err(_) => MapStyle::Outdoors,
        };

        let map_verify = match env::var("MAP_VERIFY") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("MAP_VERIFY", v))?,
            Err(_) => true,
        };

        let workout_kcal_per_minute = match env::var("WORKOUT_KCAL_PER_MINUTE") {
            Ok(v) => match v.trim().parse::<f64>() {
                Ok(kcal) if kcal.is_finite() && kcal >= 0.0 => kcal,
                _ => return Err(ConfigError::Invalid("WORKOUT_KCAL_PER_MINUTE", v)),
            },
            Err(_) => 6.0,
        };

        Ok(Self {
            map_access_token: non_empty_var("MAP_ACCESS_TOKEN"),
            map_base_url: env::var("MAP_BASE_URL")
                .unwrap_or_else(|_| "https://api.mapbox.com".to_string()),
            map_style,
            map_verify,
            persistence_url: non_empty_var("PERSISTENCE_URL"),
            persistence_token: non_empty_var("PERSISTENCE_TOKEN"),
            workout_kcal_per_minute,
        })
    }
}

/// Read an env var, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
