//! Infrastructure adapters
//!
//! Adapters connect the application ports to concrete provider clients.
//! Each provider family contributes one directions adapter and one place
//! search adapter; error folding into the routing taxonomy happens here.

mod google_adapter;
mod osm_adapter;

pub use google_adapter::{GoogleDirectionsAdapter, GooglePlacesAdapter};
pub use osm_adapter::{OsmDirectionsAdapter, OsmPlacesAdapter};
