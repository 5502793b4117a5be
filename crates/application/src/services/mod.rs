//! Application services

mod routing_service;

pub use routing_service::RoutingService;
