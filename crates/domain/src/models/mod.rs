//! Normalized result model shared by every provider adapter

mod restaurant;
mod route;

pub use restaurant::{stable_place_id, Restaurant, CUISINE_TAG, PLACE_ID_TAG};
pub use route::{ManeuverType, Route, RouteStep, RouteSummary};
