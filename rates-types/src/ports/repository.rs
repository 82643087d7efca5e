//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (SQLite, in-memory) implement this trait.

use crate::domain::{CurrencyCode, ParsedRate, RateObservation};
use crate::error::RepoError;

/// The repository port for rate observations.
///
/// Rows are only ever appended; nothing updates or deletes them.
#[async_trait::async_trait]
pub trait RateRepository: Send + Sync + 'static {
    /// Stores the rate unless a row for the same (code, date) already exists.
    ///
    /// Returns `true` when a new row was inserted. Each call commits on its
    /// own, so a failure midway through a batch leaves earlier rows in place.
    async fn upsert_if_absent(&self, rate: &ParsedRate) -> Result<bool, RepoError>;

    /// Lists every stored observation.
    async fn list_all(&self) -> Result<Vec<RateObservation>, RepoError>;

    /// Returns the rate of the most recently dated observation for `code`.
    async fn latest_rate(&self, code: &CurrencyCode) -> Result<Option<f64>, RepoError>;
}
