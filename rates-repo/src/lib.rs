//! # Rates Repository
//!
//! Concrete repository implementation (adapter) for the exchange rates service.
//! This crate provides the SQLite adapter that implements the `RateRepository` port.

pub mod sqlite;

mod types;


pub use sqlite::SqliteRepo;

/// Build and initialize a repository from a database URL.
///
/// This function:
/// 1. Creates the database file (and its directory) if missing
/// 2. Creates the table and indexes
/// 3. Returns a ready-to-use `SqliteRepo`
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://exchange_rates.db?mode=rwc").await?;
/// ```
pub async fn build_repo(database_url: &str) -> anyhow::Result<SqliteRepo> {
    SqliteRepo::new(database_url).await
}
