//! Trip cost estimation
//!
//! Static per-profile heuristics. Costs are đồng per kilometer; the traffic
//! multiplier inflates driving durations for typical urban congestion.
//! Neither is derived from live data.

use crate::value_objects::TravelProfile;

/// Fuel/operating cost per kilometer in đồng.
///
/// Profiles without an entry (walking, cycling) cost nothing.
#[must_use]
pub const fn per_km_cost(profile: TravelProfile) -> u64 {
    match profile {
        TravelProfile::DrivingCar => 3_500,
        TravelProfile::DrivingHgv => 5_500,
        TravelProfile::CyclingRegular | TravelProfile::FootWalking => 0,
    }
}

/// Estimated trip cost in đồng, rounded to the nearest unit.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimated_cost(distance_meters: f64, profile: TravelProfile) -> u64 {
    let per_km = per_km_cost(profile) as f64;
    ((distance_meters / 1000.0) * per_km).round().max(0.0) as u64
}

/// Fixed congestion factor applied to provider durations.
#[must_use]
pub const fn traffic_multiplier(profile: TravelProfile) -> f64 {
    match profile {
        TravelProfile::DrivingCar => 1.25,
        TravelProfile::DrivingHgv => 1.3,
        TravelProfile::CyclingRegular | TravelProfile::FootWalking => 1.0,
    }
}

/// Inflate a base duration by the profile's congestion factor.
#[must_use]
pub fn with_traffic_multiplier(base_seconds: f64, profile: TravelProfile) -> f64 {
    base_seconds * traffic_multiplier(profile)
}
