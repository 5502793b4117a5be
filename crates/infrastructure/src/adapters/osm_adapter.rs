//! OpenStreetMap adapters
//!
//! Implements the routing ports on top of the OpenRouteService directions
//! client and the Overpass place search client. Provider errors are folded
//! into the routing taxonomy here; nothing above this layer sees an
//! [`OsmError`].

use async_trait::async_trait;
use tracing::instrument;

use application::{DirectionsPort, PlaceSearchPort, RoutingError};
use domain::models::{Restaurant, Route};
use domain::value_objects::{GeoPoint, RouteProfile, TravelProfile};
use integration_osm::{OrsDirectionsClient, OsmConfig, OsmError, OverpassClient};

/// [`DirectionsPort`] backed by OpenRouteService
pub struct OsmDirectionsAdapter {
    client: OrsDirectionsClient,
}

impl OsmDirectionsAdapter {
    /// Create the adapter. Fails if the API key is missing or the HTTP
    /// client cannot be built.
    pub fn new(config: &OsmConfig) -> Result<Self, RoutingError> {
        let client = OrsDirectionsClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

impl std::fmt::Debug for OsmDirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsmDirectionsAdapter")
            .field("client", &"OrsDirectionsClient")
            .finish()
    }
}

#[async_trait]
impl DirectionsPort for OsmDirectionsAdapter {
    #[instrument(skip(self))]
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<Route, RoutingError> {
        self.client
            .directions(origin, destination, profile)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    async fn optimized_route(
        &self,
        waypoints: &[GeoPoint],
        profile: TravelProfile,
    ) -> Result<Route, RoutingError> {
        self.client
            .optimized_route(waypoints, profile)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn route_alternatives(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
        count: usize,
    ) -> Result<Vec<Route>, RoutingError> {
        self.client
            .route_alternatives(origin, destination, profile, count)
            .await
            .map_err(map_error)
    }

    fn supported_profiles(&self) -> Vec<RouteProfile> {
        self.client.supported_profiles()
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

/// [`PlaceSearchPort`] backed by the Overpass API
pub struct OsmPlacesAdapter {
    client: OverpassClient,
}

impl OsmPlacesAdapter {
    /// Create the adapter. Overpass is keyless; this only fails if the HTTP
    /// client cannot be built.
    pub fn new(config: &OsmConfig) -> Result<Self, RoutingError> {
        let client = OverpassClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

impl std::fmt::Debug for OsmPlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsmPlacesAdapter")
            .field("client", &"OverpassClient")
            .finish()
    }
}

#[async_trait]
impl PlaceSearchPort for OsmPlacesAdapter {
    #[instrument(skip(self))]
    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, RoutingError> {
        self.client
            .search_nearby(center, radius_meters)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn search_by_text(
        &self,
        query: &str,
        center: Option<GeoPoint>,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, RoutingError> {
        self.client
            .search_by_text(query, center, radius_meters)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn place_details(&self, reference: &str) -> Result<Option<Restaurant>, RoutingError> {
        // OSM results are addressed by their numeric node id
        let node_id: u64 = reference
            .trim()
            .parse()
            .map_err(|_| RoutingError::Validation(format!("Not an OSM node id: {reference}")))?;
        self.client.place_details(node_id).await.map_err(map_error)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

fn map_error(err: OsmError) -> RoutingError {
    match err {
        OsmError::ConnectionFailed(msg)
        | OsmError::RequestFailed(msg)
        | OsmError::ServiceUnavailable(msg) => RoutingError::Transport(msg),
        OsmError::ParseError(msg) => RoutingError::Decode(msg),
        OsmError::RateLimitExceeded { retry_after_secs } => {
            RoutingError::RateLimited { retry_after_secs }
        }
        OsmError::NoRouteFound { from, to } => RoutingError::NoRouteFound { from, to },
        OsmError::InvalidRequest(msg) => RoutingError::Validation(msg),
        OsmError::ConfigurationError(msg) => RoutingError::NotConfigured(msg),
        OsmError::Timeout { timeout_secs } => RoutingError::Timeout { timeout_secs },
    }
}
