//! Port definitions for the routing core
//!
//! Ports are the one explicit interface between the facade and the provider
//! adapters. Adapters in the infrastructure layer implement these ports for
//! each backend pair.

mod directions_port;
mod places_port;

pub use directions_port::DirectionsPort;
#[cfg(test)]
pub use directions_port::MockDirectionsPort;
#[cfg(test)]
pub use places_port::MockPlaceSearchPort;
pub use places_port::PlaceSearchPort;
