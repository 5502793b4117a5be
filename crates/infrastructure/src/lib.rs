//! Infrastructure layer - provider adapters and wiring
//!
//! Implements the ports defined in the application layer on top of the
//! provider integration crates, loads layered configuration, and assembles
//! the routing facade.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{BootstrapError, build_routing_service};
pub use config::{AppConfig, ProviderSelection};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
