//! # Rates Types
//!
//! Domain types and port traits for the exchange rates service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, RateObservation, ParsedRate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, adapter and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, ParsedRate, RateObservation};
pub use dto::*;
pub use error::{AppError, DomainError, FeedError, RepoError};
pub use ports::{FeedSource, RateRepository};
