//! Rate Application Service
//!
//! Orchestrates the feed and repository ports.
//! Contains NO infrastructure logic - pure orchestration.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use rates_feed::parse_feed;
use rates_types::{
    AppError, CurrencyCode, DomainError, FeedSource, ParsedRate, RateObservation, RateRepository,
};

/// Currency of the TCMB feed; every stored rate is quoted in it.
pub const DEFAULT_HOME_CURRENCY: &str = "TRY";

/// File the raw feed is saved to, relative to the working directory.
pub const DEFAULT_DOWNLOAD_PATH: &str = "exchange_rates.xml";

/// Application service for rate operations.
///
/// Generic over `R: RateRepository` and `F: FeedSource` - the adapters are
/// injected at compile time. This enables:
/// - Testing with in-memory repo and canned feeds
/// - Compile-time checks for port implementation
pub struct RateService<R: RateRepository, F: FeedSource> {
    repo: R,
    feed: F,
    home_currency: CurrencyCode,
    download_path: PathBuf,
}

impl<R: RateRepository, F: FeedSource> RateService<R, F> {
    /// Creates a new rate service quoting everything in `home_currency`.
    pub fn new(repo: R, feed: F, home_currency: CurrencyCode) -> Self {
        Self {
            repo,
            feed,
            home_currency,
            download_path: PathBuf::from(DEFAULT_DOWNLOAD_PATH),
        }
    }

    /// Overrides where the raw feed is written.
    pub fn with_download_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.download_path = path.into();
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying feed.
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Returns the home currency.
    pub fn home_currency(&self) -> &CurrencyCode {
        &self.home_currency
    }

    /// Returns the configured download path.
    pub fn download_path(&self) -> &Path {
        &self.download_path
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Ingest
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches the feed and stores today's rates.
    pub async fn fetch_and_store(&self) -> Result<Vec<ParsedRate>, AppError> {
        self.fetch_and_store_on(Local::now().date_naive()).await
    }

    /// Fetches the feed and stores its rates stamped with `date`.
    ///
    /// Returns every parsed rate, whether or not it was already stored.
    /// Rows written before a failing write stay committed.
    pub async fn fetch_and_store_on(&self, date: NaiveDate) -> Result<Vec<ParsedRate>, AppError> {
        let bytes = self.feed.fetch_feed().await?;
        let rates = parse_feed(&bytes, date)?;

        let mut inserted = 0usize;
        for rate in &rates {
            if self.repo.upsert_if_absent(rate).await? {
                inserted += 1;
            }
        }

        tracing::info!(
            parsed = rates.len(),
            inserted,
            %date,
            "Exchange rates fetched and stored"
        );
        Ok(rates)
    }

    /// Lists all stored observations.
    pub async fn list_rates(&self) -> Result<Vec<RateObservation>, AppError> {
        self.repo.list_all().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` using the latest stored rate of each currency.
    ///
    /// Computes `amount * (to_rate / from_rate)`; the home currency always
    /// has rate 1.0 and is never looked up.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, AppError> {
        if !amount.is_finite() {
            return Err(DomainError::NonFiniteAmount.into());
        }

        let from: CurrencyCode = from.parse()?;
        let to: CurrencyCode = to.parse()?;

        let from_rate = self.resolve_rate(&from).await?;
        let to_rate = self.resolve_rate(&to).await?;

        let converted = amount * (to_rate / from_rate);
        if !converted.is_finite() {
            return Err(AppError::Internal(format!(
                "Conversion from {} to {} is undefined (rates {} and {})",
                from, to, from_rate, to_rate
            )));
        }

        Ok(converted)
    }

    async fn resolve_rate(&self, code: &CurrencyCode) -> Result<f64, AppError> {
        if *code == self.home_currency {
            return Ok(1.0);
        }

        self.repo
            .latest_rate(code)
            .await?
            .ok_or_else(|| AppError::CurrencyNotFound(code.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Raw feed download
    // ─────────────────────────────────────────────────────────────────────────────

    /// Saves the raw feed to the download path, overwriting any previous copy.
    ///
    /// Returns the absolute path of the written file.
    pub async fn download_feed(&self) -> Result<PathBuf, AppError> {
        let bytes = self.feed.fetch_feed().await?;
        let path = &self.download_path;

        tokio::fs::write(path, &bytes).await.map_err(|e| {
            AppError::Internal(format!("Error writing feed to {}: {}", path.display(), e))
        })?;

        let resolved = tokio::fs::canonicalize(path).await.map_err(|e| {
            AppError::Internal(format!("Error resolving {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %resolved.display(), bytes = bytes.len(), "Raw feed saved");
        Ok(resolved)
    }
}
