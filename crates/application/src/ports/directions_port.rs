//! Directions service port
//!
//! One interface for every directions backend: two-point routes, multi-stop
//! optimization, and route alternatives. Coordinates cross this boundary in
//! the internal latitude-then-longitude order only.

use async_trait::async_trait;
use domain::models::Route;
use domain::value_objects::{GeoPoint, RouteProfile, TravelProfile};
#[cfg(test)]
use mockall::automock;

use crate::error::RoutingError;

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Compute a route between two points
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<Route, RoutingError>;

    /// Compute one route through all waypoints.
    ///
    /// Origin and destination stay fixed; the provider may reorder interior
    /// waypoints. Requires at least two waypoints.
    async fn optimized_route(
        &self,
        waypoints: &[GeoPoint],
        profile: TravelProfile,
    ) -> Result<Route, RoutingError>;

    /// Compute up to `count` alternative routes between two points.
    ///
    /// A `count` of zero is promoted to one: the primary route is always
    /// part of the answer.
    async fn route_alternatives(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
        count: usize,
    ) -> Result<Vec<Route>, RoutingError>;

    /// The profile catalog this backend can route for
    fn supported_profiles(&self) -> Vec<RouteProfile>;

    /// Check if the directions service is reachable
    async fn is_available(&self) -> bool;
}
