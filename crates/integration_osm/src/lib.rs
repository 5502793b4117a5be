//! OpenStreetMap provider pair for Forklore
//!
//! Provides turn-by-turn directions via the
//! [OpenRouteService](https://openrouteservice.org) API and restaurant
//! search via the [Overpass](https://overpass-api.de) API.
//!
//! # Architecture
//!
//! [`OrsDirectionsClient`] speaks the GeoJSON directions protocol: responses
//! arrive with (lon, lat) coordinate arrays that are swapped into the
//! normalized lat-first model at this boundary. [`OverpassClient`] runs
//! Overpass-QL queries against the POI index and maps node ids directly into
//! the numeric place id space. Both clients share [`OsmConfig`]; only the
//! directions side needs an API key.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{GeoPoint, TravelProfile};
//! use integration_osm::{OrsDirectionsClient, OsmConfig};
//!
//! let config = OsmConfig::default();
//! let client = OrsDirectionsClient::new(&config)?;
//!
//! let route = client.directions(
//!     GeoPoint::new(10.7765, 106.7009)?, // Bến Thành
//!     GeoPoint::new(10.8011, 106.6525)?, // Tân Bình
//!     TravelProfile::DrivingCar,
//! ).await?;
//! ```

mod config;
mod directions;
mod error;
mod places;

pub use config::OsmConfig;
pub use directions::OrsDirectionsClient;
pub use error::OsmError;
pub use places::OverpassClient;
