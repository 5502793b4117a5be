//! Google adapters
//!
//! Implements the routing ports on top of the Google Directions and Places
//! web service clients. The mapping mirrors the OpenStreetMap adapters:
//! one fold from [`GoogleError`] into the routing taxonomy, applied to
//! every port method.

use async_trait::async_trait;
use tracing::instrument;

use application::{DirectionsPort, PlaceSearchPort, RoutingError};
use domain::models::{Restaurant, Route};
use domain::value_objects::{GeoPoint, RouteProfile, TravelProfile};
use integration_google::{GoogleConfig, GoogleDirectionsClient, GoogleError, GooglePlacesClient};

/// [`DirectionsPort`] backed by the Google Directions web service
pub struct GoogleDirectionsAdapter {
    client: GoogleDirectionsClient,
}

impl GoogleDirectionsAdapter {
    /// Create the adapter. Fails if the API key is missing or the HTTP
    /// client cannot be built.
    pub fn new(config: &GoogleConfig) -> Result<Self, RoutingError> {
        let client = GoogleDirectionsClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

impl std::fmt::Debug for GoogleDirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDirectionsAdapter")
            .field("client", &"GoogleDirectionsClient")
            .finish()
    }
}

#[async_trait]
impl DirectionsPort for GoogleDirectionsAdapter {
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

/// [`PlaceSearchPort`] backed by the Google Places web service
pub struct GooglePlacesAdapter {
    client: GooglePlacesClient,
}

impl GooglePlacesAdapter {
    /// Create the adapter. Fails if the API key is missing or the HTTP
    /// client cannot be built.
    pub fn new(config: &GoogleConfig) -> Result<Self, RoutingError> {
        let client = GooglePlacesClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

impl std::fmt::Debug for GooglePlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesAdapter")
            .field("client", &"GooglePlacesClient")
            .finish()
    }
}

#[async_trait]
impl PlaceSearchPort for GooglePlacesAdapter {
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
        self.client.place_details(reference).await.map_err(map_error)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

fn map_error(err: GoogleError) -> RoutingError {
    match err {
        GoogleError::ConnectionFailed(msg)
        | GoogleError::RequestFailed(msg)
        | GoogleError::ServiceUnavailable(msg) => RoutingError::Transport(msg),
        GoogleError::ParseError(msg) => RoutingError::Decode(msg),
        GoogleError::RateLimitExceeded { retry_after_secs } => {
            RoutingError::RateLimited { retry_after_secs }
        }
        GoogleError::NoRouteFound { from, to } => RoutingError::NoRouteFound { from, to },
        GoogleError::InvalidRequest(msg) => RoutingError::Validation(msg),
        GoogleError::ConfigurationError(msg) => RoutingError::NotConfigured(msg),
        GoogleError::Timeout { timeout_secs } => RoutingError::Timeout { timeout_secs },
    }
}
