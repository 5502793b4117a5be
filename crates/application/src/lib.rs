//! Application layer - routing use cases and orchestration
//!
//! Defines the provider-agnostic routing contract (ports), the error
//! taxonomy every adapter maps onto, and the facade the app shell calls.
//! Provider adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::RoutingError;
pub use ports::*;
pub use services::*;
