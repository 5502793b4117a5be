//! OpenStreetMap provider configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the OpenStreetMap provider pair
/// (OpenRouteService directions + Overpass place search)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmConfig {
    /// OpenRouteService API key; directions calls are refused without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the OpenRouteService API
    #[serde(default = "default_directions_base_url")]
    pub directions_base_url: String,

    /// Base URL for the Overpass API host
    #[serde(default = "default_overpass_base_url")]
    pub overpass_base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of place results to return per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_directions_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_overpass_base_url() -> String {
    "https://overpass-api.de".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> usize {
    30
}

impl Default for OsmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            directions_base_url: default_directions_base_url(),
            overpass_base_url: default_overpass_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
        }
    }
}

impl OsmConfig {
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

    /// Check whether an OpenRouteService key is present
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

        Url::parse(&self.overpass_base_url)
            .map_err(|e| format!("overpass_base_url is not a valid URL: {e}"))?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        Ok(())
    }
}
