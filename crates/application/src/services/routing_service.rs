//! Provider-agnostic routing facade
//!
//! The single entry point the app shell calls. Holds one active adapter pair
//! (directions + place search) injected at construction; without credentials
//! it is built unconfigured and fails every call fast, issuing no HTTP
//! requests. Errors from the ports pass through unchanged.

use std::fmt;
use std::sync::Arc;

use domain::models::{Restaurant, Route};
use domain::value_objects::{GeoPoint, RouteProfile, TravelProfile};
use tracing::{debug, instrument};

use crate::error::RoutingError;
use crate::ports::{DirectionsPort, PlaceSearchPort};

/// The active adapter pair
struct ProviderPair {
    directions: Arc<dyn DirectionsPort>,
    places: Arc<dyn PlaceSearchPort>,
}

enum Backend {
    Active(ProviderPair),
    /// No usable provider; the string names the missing credential
    Unconfigured(String),
}

/// Routing facade over the active provider pair
pub struct RoutingService {
    backend: Backend,
}

impl fmt::Debug for RoutingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.backend {
            Backend::Active(_) => "active",
            Backend::Unconfigured(_) => "unconfigured",
        };
        f.debug_struct("RoutingService")
            .field("backend", &state)
            .finish()
    }
}

impl RoutingService {
    /// Create a facade over a configured adapter pair
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsPort>, places: Arc<dyn PlaceSearchPort>) -> Self {
        Self {
            backend: Backend::Active(ProviderPair {
                directions,
                places,
            }),
        }
    }

    /// Create a facade that fails every call with [`RoutingError::NotConfigured`].
    ///
    /// Used when the selected provider is missing its credential; the reason
    /// names what is missing so the failure is diagnosable from logs.
    #[must_use]
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
        }
    }

    /// Whether a provider pair is wired up
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Active(_))
    }

    fn backend(&self) -> Result<&ProviderPair, RoutingError> {
        match &self.backend {
            Backend::Active(pair) => Ok(pair),
            Backend::Unconfigured(reason) => Err(RoutingError::NotConfigured(reason.clone())),
        }
    }

    /// Route between two points
    ///
    /// # Errors
    ///
    /// `NotConfigured` without a provider pair; otherwise whatever the
    /// adapter returned, unchanged.
    #[instrument(skip(self))]
    pub async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<Route, RoutingError> {
        self.backend()?
            .directions
            .directions(origin, destination, profile)
            .await
    }

    /// One route through all waypoints, interior stops reordered by the
    /// provider. Origin and destination stay fixed.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without a provider pair; `Validation` from the
    /// adapter for fewer than two waypoints.
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    pub async fn optimized_route(
        &self,
        waypoints: &[GeoPoint],
        profile: TravelProfile,
    ) -> Result<Route, RoutingError> {
        self.backend()?
            .directions
            .optimized_route(waypoints, profile)
            .await
    }

    /// Up to `count` alternative routes between two points. A `count` of
    /// zero is promoted to one, so the primary route is always included.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without a provider pair; otherwise passed through.
    #[instrument(skip(self))]
    pub async fn route_alternatives(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
        count: usize,
    ) -> Result<Vec<Route>, RoutingError> {
        self.backend()?
            .directions
            .route_alternatives(origin, destination, profile, count)
            .await
    }

    /// Restaurants within `radius_meters` of `center`
    ///
    /// # Errors
    ///
    /// `NotConfigured` without a provider pair; an empty area is `Ok(vec![])`.
    #[instrument(skip(self))]
    pub async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, RoutingError> {
        self.backend()?.places.search_nearby(center, radius_meters).await
    }

    /// Free-text restaurant search.
    ///
    /// Without a location bias the query goes straight to the adapter. With
    /// a bias the facade fetches nearby results and filters them here by
    /// case-insensitive substring on name or cuisine; the OSM pair has no
    /// true text-search endpoint, and one behavior for both pairs keeps
    /// results comparable.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank query; otherwise adapter errors unchanged.
    #[instrument(skip(self))]
    pub async fn search_by_text(
        &self,
        query: &str,
        center: Option<GeoPoint>,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, RoutingError> {
        let pair = self.backend()?;
        let needle = query.trim();
        if needle.is_empty() {
            return Err(RoutingError::Validation(
                "text search query must not be empty".to_string(),
            ));
        }

        match center {
            Some(center) => {
                let nearby = pair.places.search_nearby(center, radius_meters).await?;
                let total = nearby.len();
                let matching: Vec<Restaurant> = nearby
                    .into_iter()
                    .filter(|restaurant| matches_query(restaurant, needle))
                    .collect();
                debug!(total, matching = matching.len(), "filtered biased text search");
                Ok(matching)
            },
            None => pair.places.search_by_text(needle, None, radius_meters).await,
        }
    }

    /// Full record for one place by provider-native reference
    ///
    /// # Errors
    ///
    /// `NotConfigured` without a provider pair; a missing place is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn place_details(&self, reference: &str) -> Result<Option<Restaurant>, RoutingError> {
        self.backend()?.places.place_details(reference).await
    }

    /// Profile catalog of the active pair, unmodified
    ///
    /// # Errors
    ///
    /// `NotConfigured` without a provider pair.
    pub fn profiles(&self) -> Result<Vec<RouteProfile>, RoutingError> {
        Ok(self.backend()?.directions.supported_profiles())
    }

    /// Probe both services of the active pair, sequentially
    pub async fn is_available(&self) -> bool {
        match &self.backend {
            Backend::Active(pair) => {
                pair.directions.is_available().await && pair.places.is_available().await
            },
            Backend::Unconfigured(_) => false,
        }
    }
}

fn matches_query(restaurant: &Restaurant, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    restaurant.name.to_lowercase().contains(&needle)
        || restaurant
            .cuisine()
            .is_some_and(|cuisine| cuisine.to_lowercase().contains(&needle))
}
