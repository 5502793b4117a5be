//! Google provider configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the Google provider pair (Directions + Places).
/// One key covers both services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Google Maps Platform API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the Directions web service
    #[serde(default = "default_directions_base_url")]
    pub directions_base_url: String,

    /// Base URL for the Places web service
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response language passed to both services
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of place results to return per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_directions_base_url() -> String {
    "https://maps.googleapis.com/maps/api/directions".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "vi".to_string()
}

const fn default_max_results() -> usize {
    20
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            directions_base_url: default_directions_base_url(),
            places_base_url: default_places_base_url(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            max_results: default_max_results(),
        }
    }
}

impl GoogleConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            max_results: 10,
            ..Default::default()
        }
    }

    /// Check whether an API key is present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        Url::parse(&self.directions_base_url)
            .map_err(|e| format!("directions_base_url is not a valid URL: {e}"))?;

        Url::parse(&self.places_base_url)
            .map_err(|e| format!("places_base_url is not a valid URL: {e}"))?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.language.is_empty() {
            return Err("language must not be empty".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        Ok(())
    }
}
