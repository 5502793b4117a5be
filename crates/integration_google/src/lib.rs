//! Google provider pair for Forklore
//!
//! Provides turn-by-turn directions via the Google Directions web service
//! and restaurant search via the Google Places web service.
//!
//! # Architecture
//!
//! [`GoogleDirectionsClient`] issues GET requests and receives encoded
//! overview polylines, decoded into the normalized model through the
//! domain codec; leg totals are summed into a single route and
//! `html_instructions` markup is stripped at this boundary.
//! [`GooglePlacesClient`] folds string place ids into the shared numeric id
//! space and derives cuisine tags from the place `types[]`. Both clients
//! share [`GoogleConfig`] and one API key.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoPoint;
//! use integration_google::{GoogleConfig, GooglePlacesClient};
//!
//! let config = GoogleConfig::default();
//! let client = GooglePlacesClient::new(&config)?;
//!
//! let nearby = client.search_nearby(
//!     GeoPoint::new(10.7765, 106.7009)?, // Bến Thành
//!     800.0,
//! ).await?;
//! ```

mod config;
mod directions;
mod error;
mod html;
mod places;

pub use config::GoogleConfig;
pub use directions::GoogleDirectionsClient;
pub use error::GoogleError;
pub use places::GooglePlacesClient;
