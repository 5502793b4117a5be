//! Place search port
//!
//! One interface for every restaurant search backend. Empty result sets are
//! `Ok(vec![])`, never an error; a missing place in a detail lookup is
//! `Ok(None)`.

use async_trait::async_trait;
use domain::models::Restaurant;
use domain::value_objects::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::RoutingError;

/// Port for restaurant search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceSearchPort: Send + Sync {
    /// Restaurants within `radius_meters` of `center`
    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, RoutingError>;

    /// Restaurants matching a free-text query, optionally biased to a center
    async fn search_by_text(
        &self,
        query: &str,
        center: Option<GeoPoint>,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, RoutingError>;

    /// Full record for one place by its provider-native reference
    async fn place_details(&self, reference: &str) -> Result<Option<Restaurant>, RoutingError>;

    /// Check if the place search service is reachable
    async fn is_available(&self) -> bool;
}
