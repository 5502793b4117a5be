//! Domain layer for the Forklore routing core
//!
//! Contains the normalized route/place model shared by every provider
//! adapter, the geographic value objects, the polyline codec, and the pure
//! formatting/cost helpers. This layer performs no I/O and knows nothing
//! about any specific backend.

pub mod cost;
pub mod format;
pub mod models;
pub mod polyline;
pub mod value_objects;

pub use models::{ManeuverType, Restaurant, Route, RouteStep, RouteSummary};
pub use value_objects::{GeoPoint, InvalidCoordinates, RouteProfile, TravelProfile};
