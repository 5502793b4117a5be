//! Provider wiring
//!
//! Assembles the routing facade from configuration. A selected pair with a
//! missing credential yields an unconfigured facade that fails fast and
//! issues no network traffic; it does not abort startup, so the rest of the
//! app can come up and report the problem.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use application::{RoutingError, RoutingService};

use crate::adapters::{
    GoogleDirectionsAdapter, GooglePlacesAdapter, OsmDirectionsAdapter, OsmPlacesAdapter,
};
use crate::config::{AppConfig, ProviderSelection};

/// Errors during service assembly
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A configuration section failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A provider client could not be constructed
    #[error("Provider initialization failed: {0}")]
    Provider(#[from] RoutingError),
}

/// Build the routing facade for the configured provider pair.
///
/// Provider pairs are atomic: directions and place search always come from
/// the same family, never mixed.
pub fn build_routing_service(config: &AppConfig) -> Result<RoutingService, BootstrapError> {
    config.validate().map_err(BootstrapError::InvalidConfig)?;

    match config.provider {
        ProviderSelection::Osm => {
            if !config.osm.is_configured() {
                warn!("OpenRouteService API key missing; routing starts unconfigured");
                return Ok(RoutingService::unconfigured(
                    "OpenRouteService API key is not set (FORKLORE_OSM__API_KEY)",
                ));
            }
            let directions = OsmDirectionsAdapter::new(&config.osm)?;
            let places = OsmPlacesAdapter::new(&config.osm)?;
            info!(provider = %config.provider, "Routing providers initialized");
            Ok(RoutingService::new(Arc::new(directions), Arc::new(places)))
        }
        ProviderSelection::Google => {
            if !config.google.is_configured() {
                warn!("Google API key missing; routing starts unconfigured");
                return Ok(RoutingService::unconfigured(
                    "Google API key is not set (FORKLORE_GOOGLE__API_KEY)",
                ));
            }
            let directions = GoogleDirectionsAdapter::new(&config.google)?;
            let places = GooglePlacesAdapter::new(&config.google)?;
            info!(provider = %config.provider, "Routing providers initialized");
            Ok(RoutingService::new(Arc::new(directions), Arc::new(places)))
        }
    }
}
