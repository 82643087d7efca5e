//! # Rates Hex
//!
//! Application service layer and HTTP adapter for the exchange rates service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates feed and repository ports)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/openapi.json`
//!
//! The service is generic over `R: RateRepository` and `F: FeedSource`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{DEFAULT_DOWNLOAD_PATH, DEFAULT_HOME_CURRENCY, RateService};
