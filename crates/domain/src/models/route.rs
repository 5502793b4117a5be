//! Normalized route model
//!
//! Every adapter converts its provider's wire format into these types at the
//! boundary; downstream code never sees provider-specific shapes or axis
//! orders.

use crate::format::{format_distance, format_duration};
use crate::value_objects::GeoPoint;
use serde::{Deserialize, Serialize};

/// Kind of maneuver a step asks for.
///
/// Serialized as a small integer code so the mobile shell can switch on it;
/// the codes are stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
pub enum ManeuverType {
    /// Continue straight (also the default for unmapped maneuvers)
    #[default]
    Straight = 0,
    /// Turn left
    TurnLeft = 1,
    /// Turn right
    TurnRight = 2,
    /// Slight left
    SlightLeft = 3,
    /// Slight right
    SlightRight = 4,
    /// Sharp left
    SharpLeft = 5,
    /// Sharp right
    SharpRight = 6,
    /// U-turn
    UTurn = 7,
    /// Enter or traverse a roundabout
    Roundabout = 8,
    /// Arrive at the destination or an interior waypoint
    Arrive = 9,
    /// Depart from the origin or an interior waypoint
    Depart = 10,
    /// Provider sent a maneuver the model does not classify
    Unknown = 11,
}

impl ManeuverType {
    /// Stable wire code
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Resolve a wire code; codes outside the enumeration become `Unknown`
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Straight,
            1 => Self::TurnLeft,
            2 => Self::TurnRight,
            3 => Self::SlightLeft,
            4 => Self::SlightRight,
            5 => Self::SharpLeft,
            6 => Self::SharpRight,
            7 => Self::UTurn,
            8 => Self::Roundabout,
            9 => Self::Arrive,
            10 => Self::Depart,
            _ => Self::Unknown,
        }
    }
}

impl From<u8> for ManeuverType {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl From<ManeuverType> for u8 {
    fn from(maneuver: ManeuverType) -> Self {
        maneuver.code()
    }
}

/// One maneuver of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Length of the step in meters
    pub distance_meters: f64,
    /// Travel time for the step in seconds
    pub duration_seconds: f64,
    /// Plain-text instruction (markup stripped at the adapter boundary)
    pub instruction: String,
    /// Maneuver classification
    pub maneuver: ManeuverType,
    /// Start/end index into the owning route's geometry
    pub waypoint_range: (usize, usize),
}

impl RouteStep {
    /// Human-readable step length, e.g. "350m"
    #[must_use]
    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_meters)
    }
}

/// Convenience alias of the route totals, kept equal to the route fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total duration in seconds
    pub duration_seconds: f64,
}

/// A complete normalized route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Total distance in meters, summed across all legs
    pub distance_meters: f64,
    /// Total duration in seconds, summed across all legs
    pub duration_seconds: f64,
    /// Ordered steps, concatenated across legs for multi-stop routes
    pub steps: Vec<RouteStep>,
    /// Dense path for rendering, latitude-then-longitude
    pub geometry: Vec<GeoPoint>,
    /// Totals alias; always equal to the fields above
    pub summary: RouteSummary,
}

impl Route {
    /// Build a route; the summary is derived from the totals so the alias
    /// invariant holds by construction.
    #[must_use]
    pub fn new(
        distance_meters: f64,
        duration_seconds: f64,
        steps: Vec<RouteStep>,
        geometry: Vec<GeoPoint>,
    ) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            steps,
            geometry,
            summary: RouteSummary {
                distance_meters,
                duration_seconds,
            },
        }
    }

    /// Human-readable total distance, e.g. "4.2km"
    #[must_use]
    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_meters)
    }

    /// Human-readable total duration, e.g. "1h 5m"
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_seconds)
    }
}
