//! Domain models for the exchange rates service.

pub mod currency;
pub mod rate;

pub use currency::CurrencyCode;
pub use rate::{ParsedRate, RateObservation};
