//! Application configuration
//!
//! Layered: compiled defaults, then an optional `forklore.toml`, then
//! `FORKLORE_*` environment variables. Nesting levels in variable names are
//! separated with `__`, so `FORKLORE_OSM__API_KEY` sets `osm.api_key` and
//! `FORKLORE_PROVIDER=google` switches the provider pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use integration_google::GoogleConfig;
use integration_osm::OsmConfig;

use crate::telemetry::TelemetryConfig;

/// Which provider pair serves routing and search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSelection {
    /// OpenRouteService directions + Overpass search
    #[default]
    Osm,
    /// Google Directions + Google Places
    Google,
}

impl fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Osm => write!(f, "osm"),
            Self::Google => write!(f, "google"),
        }
    }
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active provider pair
    #[serde(default)]
    pub provider: ProviderSelection,

    /// OpenStreetMap provider settings
    #[serde(default)]
    pub osm: OsmConfig,

    /// Google provider settings
    #[serde(default)]
    pub google: GoogleConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// Defaults live on the serde derives; sources only override.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("forklore").required(false))
            .add_source(
                config::Environment::with_prefix("FORKLORE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate every section, not just the active provider's. A broken
    /// inactive section would otherwise surface only on provider switch.
    pub fn validate(&self) -> Result<(), String> {
        self.osm.validate()?;
        self.google.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_provider_is_osm() {
        let config = AppConfig::default();
        assert_eq!(config.provider, ProviderSelection::Osm);
    }

    #[test]
    fn provider_selection_parses_lowercase() {
        let config: AppConfig =
            serde_json::from_str(r#"{"provider": "google"}"#).expect("valid config");
        assert_eq!(config.provider, ProviderSelection::Google);
    }

    #[test]
    fn provider_selection_displays_lowercase() {
        assert_eq!(ProviderSelection::Osm.to_string(), "osm");
        assert_eq!(ProviderSelection::Google.to_string(), "google");
    }

    #[test]
    fn empty_document_yields_full_defaults() {
        let config: AppConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.osm.directions_base_url, "https://api.openrouteservice.org");
        assert_eq!(config.google.language, "vi");
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_deserialize() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "provider": "osm",
                "osm": {"api_key": "abc123", "timeout_secs": 3},
                "telemetry": {"json_output": true}
            }"#,
        )
        .expect("valid config");
        assert!(config.osm.is_configured());
        assert_eq!(config.osm.timeout_secs, 3);
        assert!(config.telemetry.json_output);
    }

    #[test]
    fn validate_covers_inactive_sections() {
        let config = AppConfig {
            provider: ProviderSelection::Google,
            osm: OsmConfig {
                timeout_secs: 0,
                ..OsmConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_provider_name_is_rejected() {
        let result = serde_json::from_str::<AppConfig>(r#"{"provider": "here"}"#);
        assert!(result.is_err());
    }
}
