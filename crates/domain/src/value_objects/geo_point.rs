//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic point, always latitude-then-longitude.
///
/// Providers that speak longitude-first (GeoJSON) are converted at the
/// adapter boundary; inside the model the axis order is never ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for out-of-range or non-finite coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinates {
    /// The rejected latitude
    pub latitude: f64,
    /// The rejected longitude
    pub longitude: f64,
}

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates ({}, {}): latitude must be -90 to 90, longitude must be -180 to 180",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite
    /// (NaN and infinities fail the range checks).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without validation (for literals and trusted sources)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Approximate great-circle distance to another point in meters
    ///
    /// Haversine formula; good enough for result ordering and radius
    /// filtering, not for billing.
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Common points for defaults and tests
impl GeoPoint {
    /// Ho Chi Minh City, Vietnam
    #[must_use]
    pub const fn ho_chi_minh_city() -> Self {
        Self::new_unchecked(10.7769, 106.7009)
    }

    /// Hanoi, Vietnam
    #[must_use]
    pub const fn hanoi() -> Self {
        Self::new_unchecked(21.0278, 105.8342)
    }

    /// Da Nang, Vietnam
    #[must_use]
    pub const fn da_nang() -> Self {
        Self::new_unchecked(16.0544, 108.2022)
    }
}
