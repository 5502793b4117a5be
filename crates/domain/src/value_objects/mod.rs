//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod travel_profile;

pub use geo_point::{GeoPoint, InvalidCoordinates};
pub use travel_profile::{RouteProfile, TravelProfile};
