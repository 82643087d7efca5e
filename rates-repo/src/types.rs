//! Database row types and their mapping to domain types.

use chrono::NaiveDate;
use sqlx::FromRow;

use rates_types::{CurrencyCode, RateObservation, RepoError};

/// Dates are stored as ISO text so lexical order is chronological order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rate observation row from database.
#[derive(FromRow)]
pub struct DbRateObservation {
    pub id: i64,
    pub currency_code: String,
    pub rate: f64,
    pub date: String,
}

impl DbRateObservation {
    pub fn into_domain(self) -> Result<RateObservation, RepoError> {
        let currency_code: CurrencyCode = self
            .currency_code
            .parse()
            .map_err(|e: rates_types::DomainError| RepoError::Database(e.to_string()))?;

        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| RepoError::Database(format!("Invalid stored date {:?}: {}", self.date, e)))?;

        Ok(RateObservation::from_parts(
            self.id,
            currency_code,
            self.rate,
            date,
        ))
    }
}

/// Rate-only row for latest-rate lookups.
#[derive(FromRow)]
pub struct DbRate {
    pub rate: f64,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
