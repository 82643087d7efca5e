//! Error types for the exchange rates service.

use crate::domain::CurrencyCode;

/// Domain-level errors (validation rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Rate for {code} must be positive, got {rate}")]
    NonPositiveRate { code: CurrencyCode, rate: f64 },

    #[error("Amount must be a finite number")]
    NonFiniteAmount,
}

/// Feed-level errors (remote XML source).
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed feed: {0}")]
    Malformed(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Currency code not found: {0}")]
    CurrencyNotFound(String),

    #[error("Error fetching XML data: {0}")]
    FeedUnavailable(String),

    #[error("Error parsing XML data: {0}")]
    MalformedFeed(String),

    #[error("Database error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Unavailable(e) => AppError::FeedUnavailable(e),
            FeedError::Malformed(e) => AppError::MalformedFeed(e),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => AppError::Persistence(e),
        }
    }
}
