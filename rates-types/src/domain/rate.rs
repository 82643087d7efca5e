//! Rate observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CurrencyCode;
use crate::error::DomainError;

/// A rate read from the feed, not yet persisted.
///
/// This is also what the fetch endpoint echoes back: the parsed batch, not a
/// re-read of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParsedRate {
    pub currency_code: CurrencyCode,
    /// Home-currency price of one unit of `currency_code`.
    #[schema(example = 34.2512)]
    pub rate: f64,
    #[schema(value_type = String, format = Date, example = "2026-10-16")]
    pub date: NaiveDate,
}

impl ParsedRate {
    /// Creates a parsed rate. The rate must be finite and strictly positive.
    pub fn new(currency_code: CurrencyCode, rate: f64, date: NaiveDate) -> Result<Self, DomainError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DomainError::NonPositiveRate {
                code: currency_code,
                rate,
            });
        }
        Ok(Self {
            currency_code,
            rate,
            date,
        })
    }
}

/// A stored rate observation.
///
/// At most one observation exists per (`currency_code`, `date`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateObservation {
    /// Surrogate key assigned by the store.
    #[schema(example = 1)]
    pub id: i64,
    pub currency_code: CurrencyCode,
    #[schema(example = 34.2512)]
    pub rate: f64,
    #[schema(value_type = String, format = Date, example = "2026-10-16")]
    pub date: NaiveDate,
}

impl RateObservation {
    /// Reconstructs an observation from storage (no validation).
    pub fn from_parts(id: i64, currency_code: CurrencyCode, rate: f64, date: NaiveDate) -> Self {
        Self {
            id,
            currency_code,
            rate,
            date,
        }
    }
}
